//! Operator entry point installed by the binary.

/// Concrete operator behind the CLI's [`OperatorPort`].
///
/// [`OperatorPort`]: crate::port::inbound::operator::port::OperatorPort
#[derive(Debug, Clone, Copy, Default)]
pub struct Operator;

impl Operator {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}
