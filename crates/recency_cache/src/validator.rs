use crate::error::{ErrorCode, ScriptError, ValidationResult};
use crate::model::{Script, Step};

const SUPPORTED_VERSION: u8 = 1;

pub fn validate_script(script: &Script) -> ValidationResult {
    let mut errors = Vec::new();

    if script.version != SUPPORTED_VERSION {
        errors.push(
            ScriptError::new(
                ErrorCode::InvalidVersion,
                format!(
                    "unsupported version {}, expected {}",
                    script.version, SUPPORTED_VERSION
                ),
            )
            .with_path("version"),
        );
    }

    if script.capacity <= 0 {
        errors.push(
            ScriptError::new(
                ErrorCode::InvalidCapacity,
                format!("capacity must be positive, got {}", script.capacity),
            )
            .with_path("capacity"),
        );
    }

    for (index, step) in script.operations.iter().enumerate() {
        if let Step::Resize { capacity } = step {
            if *capacity <= 0 {
                errors.push(
                    ScriptError::new(
                        ErrorCode::InvalidResize,
                        format!("resize capacity must be positive, got {}", capacity),
                    )
                    .with_path(format!("operations[{}].capacity", index)),
                );
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
