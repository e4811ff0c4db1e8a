//! Internal plumbing shared by the codec modules.

pub mod bits;
