use crate::PercentError;

#[derive(thiserror::Error, Debug)]
pub enum MetricsUnavailable {
    #[error("metrics unavailable :: unsupported platform `{0}`")]
    UnsupportedPlatform(&'static str),

    #[error("metrics unavailable :: no cpus reported by the operating system")]
    NoCpus,

    #[error("metrics unavailable :: total memory reported as zero")]
    NoMemory,

    #[error("metrics unavailable :: invalid {what} reading :: {source}")]
    InvalidReading {
        what: &'static str,
        #[source]
        source: PercentError,
    },

    #[error("metrics unavailable :: {0}")]
    Provider(String),
}
