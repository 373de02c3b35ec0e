use api_types::{Numeric, parse_int};

/// Anything a caller may pass as a record identifier.
///
/// Strings are coerced with a leading-integer parse (`"12"` and `"12abc"`
/// are both `12`); a value that yields no integer means "no such record".
pub trait RecordKey {
    fn record_id(&self) -> Option<i64>;
}

impl RecordKey for i64 {
    fn record_id(&self) -> Option<i64> {
        Some(*self)
    }
}

impl RecordKey for i32 {
    fn record_id(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl RecordKey for u32 {
    fn record_id(&self) -> Option<i64> {
        Some(i64::from(*self))
    }
}

impl RecordKey for u64 {
    fn record_id(&self) -> Option<i64> {
        i64::try_from(*self).ok()
    }
}

impl RecordKey for str {
    fn record_id(&self) -> Option<i64> {
        parse_int(self)
    }
}

impl RecordKey for String {
    fn record_id(&self) -> Option<i64> {
        parse_int(self)
    }
}

impl RecordKey for Numeric {
    fn record_id(&self) -> Option<i64> {
        self.to_i64()
    }
}

impl<T: RecordKey + ?Sized> RecordKey for &T {
    fn record_id(&self) -> Option<i64> {
        (**self).record_id()
    }
}
