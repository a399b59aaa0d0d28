use std::fmt;
use std::error::Error;

/// Represents errors that can occur while building or querying a Barnes-Hut tree,
/// or while driving a simulation with one.
#[derive(Debug, Clone, PartialEq)]
pub enum BarnesHutError {
    /// The node arena ran out of slots. The arena has to be rebuilt with a larger capacity.
    OutOfCapacity { capacity: usize },
    /// A node handle from an earlier build was used after the arena was reset.
    StaleHandle { index: usize },
    /// The queried body has a non-finite position or mass.
    DegenerateQuery { id: usize },
    /// Indicates an invalid mass value (e.g., negative or NaN mass).
    InvalidMass,
    /// Indicates a bounding region with a non-positive half extent or a non-finite center.
    InvalidRegion,
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// A particle record could not be parsed.
    Parse { line: usize, message: String },
    /// Reading or writing a particle file failed.
    Io(String),
}

impl fmt::Display for BarnesHutError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BarnesHutError::OutOfCapacity { capacity } => {
                write!(f, "Node arena exhausted (capacity {} nodes)", capacity)
            }
            BarnesHutError::StaleHandle { index } => {
                write!(f, "Node handle {} belongs to an earlier tree build", index)
            }
            BarnesHutError::DegenerateQuery { id } => {
                write!(f, "Body {} has a non-finite position or mass", id)
            }
            BarnesHutError::InvalidMass => write!(f, "Invalid mass value"),
            BarnesHutError::InvalidRegion => write!(f, "Invalid bounding region"),
            BarnesHutError::InvalidConfig(msg) => write!(f, "Invalid configuration: {}", msg),
            BarnesHutError::Parse { line, message } => {
                write!(f, "Parse error on line {}: {}", line, message)
            }
            BarnesHutError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl Error for BarnesHutError {}

impl From<std::io::Error> for BarnesHutError {
    fn from(err: std::io::Error) -> Self {
        BarnesHutError::Io(err.to_string())
    }
}
