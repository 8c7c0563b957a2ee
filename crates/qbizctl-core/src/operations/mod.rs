//! The operations exposed through the adapter, grouped by resource

mod application;
mod document;
mod index;
mod subscription;

pub use application::*;
pub use document::*;
pub use index::*;
pub use subscription::*;

use crate::adapter::OperationDescriptor;

/// Descriptors of every supported operation
pub static ALL: &[&OperationDescriptor] = &[
    &CREATE_APPLICATION,
    &GET_APPLICATION,
    &LIST_APPLICATIONS,
    &UPDATE_APPLICATION,
    &DELETE_APPLICATION,
    &CREATE_INDEX,
    &GET_INDEX,
    &LIST_INDICES,
    &UPDATE_INDEX,
    &DELETE_INDEX,
    &LIST_DOCUMENTS,
    &BATCH_PUT_DOCUMENT,
    &BATCH_DELETE_DOCUMENT,
    &CREATE_SUBSCRIPTION,
    &LIST_SUBSCRIPTIONS,
    &CANCEL_SUBSCRIPTION,
];

/// Look up an operation descriptor by name, case-insensitively
pub fn find(name: &str) -> Option<&'static OperationDescriptor> {
    ALL.iter()
        .copied()
        .find(|descriptor| descriptor.name.eq_ignore_ascii_case(name))
}
