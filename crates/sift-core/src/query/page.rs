use crate::{DEFAULT_PAGE_SIZE, error::DecodeError};
use serde::{Deserialize, Serialize};

///
/// PageSpec
///
/// One-based page number and page size. `skip` and `take` are derived,
/// never stored.
///

#[derive(Clone, Copy, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
#[serde(try_from = "WirePage")]
pub struct PageSpec {
    #[serde(rename = "num")]
    number: u32,
    size: u32,
}

impl PageSpec {
    /// Build a page; both inputs must be positive.
    pub fn new(number: u32, size: u32) -> Result<Self, DecodeError> {
        if number == 0 {
            return Err(DecodeError::new("page number must be positive"));
        }
        if size == 0 {
            return Err(DecodeError::new("page size must be positive"));
        }

        Ok(Self { number, size })
    }

    #[must_use]
    pub const fn number(&self) -> u32 {
        self.number
    }

    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    #[must_use]
    pub const fn is_first(&self) -> bool {
        self.number == 1
    }

    /// Rows skipped before this page: `(number - 1) * size`.
    #[must_use]
    pub fn skip(&self) -> u64 {
        u64::from(self.number - 1) * u64::from(self.size)
    }

    #[must_use]
    pub fn take(&self) -> u64 {
        u64::from(self.size)
    }
}

///
/// WirePage
///

#[derive(Deserialize)]
struct WirePage {
    #[serde(default = "default_number")]
    num: i64,
    #[serde(default = "default_size")]
    size: i64,
}

const fn default_number() -> i64 {
    1
}

fn default_size() -> i64 {
    i64::from(DEFAULT_PAGE_SIZE)
}

impl TryFrom<WirePage> for PageSpec {
    type Error = DecodeError;

    fn try_from(wire: WirePage) -> Result<Self, Self::Error> {
        let number = u32::try_from(wire.num)
            .map_err(|_| DecodeError::new(format!("page number {} is out of range", wire.num)))?;
        let size = u32::try_from(wire.size)
            .map_err(|_| DecodeError::new(format!("page size {} is out of range", wire.size)))?;

        Self::new(number, size)
    }
}
