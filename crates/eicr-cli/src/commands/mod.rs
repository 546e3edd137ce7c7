pub mod assess;
pub mod devices;
pub mod dispatch;
pub mod report;
pub mod schema;
pub mod shared;
pub mod step;
pub mod validate;

/// How a command finished, mapped to the process exit status in `main`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Outcome {
    Done,
    /// `--strict` was requested and the installation is not compliant.
    NonCompliant,
}
