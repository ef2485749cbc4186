/// Error type for option registration and probe bookkeeping
#[derive(Debug)]
pub enum ProbeError {
    /// An option with the same destination was already registered
    DuplicateOption(String),
    /// A uselib already carries an outcome for this configuration run
    AlreadyRecorded(String),
    /// A probe asked for an option nobody registered
    MissingOption(String),
    /// IO error
    Io(std::io::Error),
}

impl std::fmt::Display for ProbeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProbeError::DuplicateOption(dest) => {
                write!(f, "option '{}' is already registered", dest)
            }
            ProbeError::AlreadyRecorded(uselib) => {
                write!(f, "uselib '{}' was already probed in this run", uselib)
            }
            ProbeError::MissingOption(dest) => write!(f, "option '{}' is not registered", dest),
            ProbeError::Io(e) => write!(f, "IO error: {}", e),
        }
    }
}

impl std::error::Error for ProbeError {}

impl From<std::io::Error> for ProbeError {
    fn from(e: std::io::Error) -> Self {
        ProbeError::Io(e)
    }
}
