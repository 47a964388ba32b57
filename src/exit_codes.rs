//! Exit code constants for the dialplan CLI.
//!
//! - 0: Success
//! - 1: User error (bad args, invalid state)
//! - 2: Validation failure (identifier or required-field checks)
//! - 3: Gateway failure (interpreter missing, IO, timeout)
//! - 4: Execution failure (gateway output contained ERROR markers)
//! - 5: Expired gateway session

/// Successful execution.
pub const SUCCESS: i32 = 0;

/// User error: bad arguments, unreadable files, invalid state.
pub const USER_ERROR: i32 = 1;

/// Validation failure: identifier rejected or required field missing.
pub const VALIDATION_FAILURE: i32 = 2;

/// Gateway failure: the script interpreter could not be spawned or timed out.
pub const GATEWAY_FAILURE: i32 = 3;

/// Execution failure: the backend reported ERROR lines in the script output.
pub const EXECUTION_FAILURE: i32 = 4;

/// The gateway session was stale; the dispatch was refused.
pub const SESSION_EXPIRED: i32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        let codes = [
            SUCCESS,
            USER_ERROR,
            VALIDATION_FAILURE,
            GATEWAY_FAILURE,
            EXECUTION_FAILURE,
            SESSION_EXPIRED,
        ];
        for (i, &a) in codes.iter().enumerate() {
            for (j, &b) in codes.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "Exit codes must be distinct");
                }
            }
        }
    }

    #[test]
    fn test_exit_codes_are_stable() {
        assert_eq!(SUCCESS, 0);
        assert_eq!(USER_ERROR, 1);
        assert_eq!(VALIDATION_FAILURE, 2);
        assert_eq!(GATEWAY_FAILURE, 3);
        assert_eq!(EXECUTION_FAILURE, 4);
        assert_eq!(SESSION_EXPIRED, 5);
    }
}
