//! Internal helpers shared by the write operations.
//!
//! These utilities are **not** part of the public API.

use sea_orm::{ActiveValue, Value};

/// Overwrite an active model column only when a new value was provided.
pub(crate) fn set_if_some<T>(slot: &mut ActiveValue<T>, value: Option<T>)
where
    T: Into<Value>,
{
    if let Some(value) = value {
        *slot = ActiveValue::Set(value);
    }
}

/// Like [`set_if_some`] for nullable columns.
pub(crate) fn set_nullable_if_some<T>(slot: &mut ActiveValue<Option<T>>, value: Option<T>)
where
    Option<T>: Into<Value>,
{
    if let Some(value) = value {
        *slot = ActiveValue::Set(Some(value));
    }
}
