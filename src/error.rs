// Copyright 2026 Drell-Yan MC Contributors
// SPDX-License-Identifier: Apache-2.0

//! Error types for the cross-section estimator.

use std::fmt;

/// Result type alias for estimator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Estimator error types.
#[derive(Debug)]
pub enum Error {
    /// Configuration error
    Config(String),
    /// Validation error (rejected before sampling starts)
    Validation(ValidationError),
    /// An accepted event hit a singular point of the integrand
    DegenerateEvent(DegenerateEvent),
    /// IO error
    Io(std::io::Error),
    /// Serialization error
    Serialization(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Config(msg) => write!(f, "Configuration error: {}", msg),
            Error::Validation(e) => write!(f, "Validation error: {}", e),
            Error::DegenerateEvent(e) => write!(f, "Degenerate event: {}", e),
            Error::Io(e) => write!(f, "IO error: {}", e),
            Error::Serialization(msg) => write!(f, "Serialization error: {}", msg),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Io(e) => Some(e),
            Error::Validation(e) => Some(e),
            Error::DegenerateEvent(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<ValidationError> for Error {
    fn from(e: ValidationError) -> Self {
        Error::Validation(e)
    }
}

impl From<DegenerateEvent> for Error {
    fn from(e: DegenerateEvent) -> Self {
        Error::DegenerateEvent(e)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

/// Validation errors.
#[derive(Debug)]
pub enum ValidationError {
    /// Field validation failed
    Field { field: String, message: String },
    /// Physics constraint violated
    PhysicsConstraint(String),
    /// Bin edges are unusable
    BinEdges(String),
    /// Resource limit exceeded
    ResourceLimit {
        resource: String,
        limit: u64,
        requested: u64,
    },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Field { field, message } => {
                write!(f, "Field '{}': {}", field, message)
            }
            ValidationError::PhysicsConstraint(msg) => {
                write!(f, "Physics constraint violated: {}", msg)
            }
            ValidationError::BinEdges(msg) => write!(f, "Invalid bin edges: {}", msg),
            ValidationError::ResourceLimit {
                resource,
                limit,
                requested,
            } => {
                write!(
                    f,
                    "Resource limit exceeded for {}: limit={}, requested={}",
                    resource, limit, requested
                )
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Kinematics of an accepted event whose weight could not be evaluated.
///
/// Carries what is needed to replay the trial: the worker whose random stream
/// produced it, its global index, and the sampled invariants.
#[derive(Debug, Clone, PartialEq)]
pub struct DegenerateEvent {
    /// Global trial index (0-based).
    pub trial: u64,
    /// Worker (random stream) index.
    pub worker: usize,
    /// What went wrong.
    pub reason: String,
    pub s: f64,
    pub t: f64,
    pub u: f64,
    pub x1: f64,
    pub x2: f64,
    pub jacobian: f64,
}

impl fmt::Display for DegenerateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "trial {} (worker {}): {} (s={:e}, t={:e}, u={:e}, x1={:e}, x2={:e}, jacobian={:e})",
            self.trial,
            self.worker,
            self.reason,
            self.s,
            self.t,
            self.u,
            self.x1,
            self.x2,
            self.jacobian
        )
    }
}

impl std::error::Error for DegenerateEvent {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    fn degenerate() -> DegenerateEvent {
        DegenerateEvent {
            trial: 17,
            worker: 0,
            reason: "t is zero".into(),
            s: 100.0,
            t: 0.0,
            u: -100.0,
            x1: 0.5,
            x2: 0.25,
            jacobian: 3.0,
        }
    }

    // =========================================================================
    // Error Display tests
    // =========================================================================

    #[test]
    fn test_error_display_config() {
        let e = Error::Config("no such file".into());
        assert_eq!(e.to_string(), "Configuration error: no such file");
    }

    #[test]
    fn test_error_display_validation() {
        let e = Error::Validation(ValidationError::PhysicsConstraint("mmin >= mmax".into()));
        assert_eq!(
            e.to_string(),
            "Validation error: Physics constraint violated: mmin >= mmax"
        );
    }

    #[test]
    fn test_error_display_degenerate_event() {
        let e = Error::DegenerateEvent(degenerate());
        let msg = e.to_string();
        assert!(msg.starts_with("Degenerate event: trial 17 (worker 0): t is zero"));
        assert!(msg.contains("s=1e2"));
    }

    #[test]
    fn test_error_display_io() {
        let e = Error::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(e.to_string(), "IO error: gone");
    }

    #[test]
    fn test_error_display_serialization() {
        let e = Error::Serialization("invalid yaml".into());
        assert_eq!(e.to_string(), "Serialization error: invalid yaml");
    }

    // =========================================================================
    // ValidationError Display tests
    // =========================================================================

    #[test]
    fn test_validation_error_display_field() {
        let e = ValidationError::Field {
            field: "calls".into(),
            message: "must be greater than 0".into(),
        };
        assert_eq!(e.to_string(), "Field 'calls': must be greater than 0");
    }

    #[test]
    fn test_validation_error_display_bin_edges() {
        let e = ValidationError::BinEdges("need at least two edges".into());
        assert_eq!(e.to_string(), "Invalid bin edges: need at least two edges");
    }

    #[test]
    fn test_validation_error_display_resource_limit() {
        let e = ValidationError::ResourceLimit {
            resource: "calls".into(),
            limit: 1000,
            requested: 2000,
        };
        assert_eq!(
            e.to_string(),
            "Resource limit exceeded for calls: limit=1000, requested=2000"
        );
    }

    // =========================================================================
    // Error::source() tests
    // =========================================================================

    #[test]
    fn test_error_source_io() {
        let e = Error::Io(std::io::Error::other("disk"));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_validation() {
        let e = Error::Validation(ValidationError::PhysicsConstraint("bad".into()));
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_degenerate() {
        let e = Error::DegenerateEvent(degenerate());
        assert!(e.source().is_some());
    }

    #[test]
    fn test_error_source_none_for_config() {
        assert!(Error::Config("x".into()).source().is_none());
        assert!(Error::Serialization("x".into()).source().is_none());
    }

    // =========================================================================
    // From impls
    // =========================================================================

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "nope");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
    }

    #[test]
    fn test_from_validation_error() {
        let e: Error = ValidationError::PhysicsConstraint("x".into()).into();
        assert!(matches!(e, Error::Validation(_)));
    }

    #[test]
    fn test_from_degenerate_event() {
        let e: Error = degenerate().into();
        assert!(matches!(e, Error::DegenerateEvent(ref d) if d.trial == 17));
    }

    #[test]
    fn test_from_serde_yaml_error() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("{{{{").unwrap_err();
        let e: Error = yaml_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{bad}").unwrap_err();
        let e: Error = json_err.into();
        assert!(matches!(e, Error::Serialization(_)));
    }
}
