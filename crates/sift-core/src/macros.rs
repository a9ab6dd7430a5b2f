/// Declare a projection and its output constructor from one field list, so
/// the constructor and the member table can never disagree.
///
/// ```ignore
/// let projection = projection!(Parent => ParentDto {
///     name: String = |p| p.name.clone(),
///     child_ids: list i64 = |p| Box::new(p.children.iter().map(|c| c.id)),
/// })?;
/// ```
///
/// Field forms: `name: T = |row| expr` (scalar), `name: seq T = ...` (lazy
/// sequence), `name: list T = ...` and `name: array T = ...` (materialized
/// sequences). Sequence bodies return `Box<dyn Iterator<Item = T>>`; the
/// constructor collects them into the output field.
#[macro_export]
macro_rules! projection {
    ($in:ty => $out:ident { $($fields:tt)* }) => {
        $crate::projection!(@munch $in, $out, __row, [] [] $($fields)*)
    };

    (@munch $in:ty, $out:ident, $r:ident, [$($ctor:tt)*] [$($bind:tt)*]
        $field:ident : seq $ty:ty = |$row:ident| $value:expr $(, $($rest:tt)*)?) => {
        $crate::projection!(@munch $in, $out, $r,
            [$($ctor)* $field: $crate::projection!(@collect $in, $ty, $r, $row, $value),]
            [$($bind)* .sequence::<$ty, _>(stringify!($field), |$row| $value)]
            $($($rest)*)?)
    };

    (@munch $in:ty, $out:ident, $r:ident, [$($ctor:tt)*] [$($bind:tt)*]
        $field:ident : list $ty:ty = |$row:ident| $value:expr $(, $($rest:tt)*)?) => {
        $crate::projection!(@munch $in, $out, $r,
            [$($ctor)* $field: $crate::projection!(@collect $in, $ty, $r, $row, $value),]
            [$($bind)* .list::<$ty, _>(stringify!($field), |$row| $value)]
            $($($rest)*)?)
    };

    (@munch $in:ty, $out:ident, $r:ident, [$($ctor:tt)*] [$($bind:tt)*]
        $field:ident : array $ty:ty = |$row:ident| $value:expr $(, $($rest:tt)*)?) => {
        $crate::projection!(@munch $in, $out, $r,
            [$($ctor)* $field: $crate::projection!(@collect $in, $ty, $r, $row, $value),]
            [$($bind)* .array::<$ty, _>(stringify!($field), |$row| $value)]
            $($($rest)*)?)
    };

    (@munch $in:ty, $out:ident, $r:ident, [$($ctor:tt)*] [$($bind:tt)*]
        $field:ident : $ty:ty = |$row:ident| $value:expr $(, $($rest:tt)*)?) => {
        $crate::projection!(@munch $in, $out, $r,
            [$($ctor)* $field: { let $row: &$in = $r; $value },]
            [$($bind)* .field::<$ty, _>(stringify!($field), |$row| $value)]
            $($($rest)*)?)
    };

    (@munch $in:ty, $out:ident, $r:ident, [$($ctor:tt)*] [$($bind:tt)*]) => {
        $crate::projection::Projection::<$in, $out>::builder(|$r: &$in| $out { $($ctor)* })
            $($bind)*
            .build()
    };

    (@collect $in:ty, $ty:ty, $source:ident, $row:ident, $value:expr) => {{
        let $row: &$in = $source;
        let values: ::std::boxed::Box<dyn ::std::iter::Iterator<Item = $ty> + '_> = $value;
        values.collect()
    }};
}
