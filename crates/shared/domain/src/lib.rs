//! # Domain Models
//!
//! Pure management metadata: typed values, attribute/operation/notification descriptors,
//! notification events, object names and the runtime configuration model.
//! Keep it lean: no I/O, no dispatch logic, just data and simple helpers.

pub mod config;
pub mod descriptor;
mod error;
pub mod notification;
pub mod object_name;
pub mod value;

pub use crate::error::{DomainError, DomainErrorExt};

pub mod prelude {
    pub use crate::descriptor::{
        AttributeAccess, AttributeDescriptor, NotificationDescriptor, ObjectDescriptor,
        OperationDescriptor, OperationImpact, ParameterDescriptor,
    };
    pub use crate::notification::{Notification, NotificationPayload, types};
    pub use crate::object_name::ObjectName;
    pub use crate::value::{Attribute, AttributeList, Typed, Value, ValueType};
}
