//! Unit tests for RuntimeError and ErrorKind

use core_types::{ErrorKind, RuntimeError, StackFrame};

#[cfg(test)]
mod error_kind_tests {
    use super::*;

    #[test]
    fn test_error_kind_is_copy() {
        let kind1 = ErrorKind::TypeError;
        let kind2 = kind1;
        assert_eq!(kind1, kind2);
    }

    #[test]
    fn test_error_kind_display_matches_name() {
        for kind in [
            ErrorKind::UsageError,
            ErrorKind::FieldError,
            ErrorKind::TypeError,
            ErrorKind::BoundsError,
            ErrorKind::RangeError,
            ErrorKind::CallError,
            ErrorKind::StateError,
        ] {
            assert_eq!(kind.to_string(), kind.name());
        }
    }
}

#[cfg(test)]
mod runtime_error_tests {
    use super::*;

    #[test]
    fn test_shorthand_constructors_set_kind() {
        assert_eq!(RuntimeError::usage("x").kind, ErrorKind::UsageError);
        assert_eq!(RuntimeError::field("x").kind, ErrorKind::FieldError);
        assert_eq!(RuntimeError::type_error("x").kind, ErrorKind::TypeError);
        assert_eq!(RuntimeError::bounds("x").kind, ErrorKind::BoundsError);
        assert_eq!(RuntimeError::range("x").kind, ErrorKind::RangeError);
        assert_eq!(RuntimeError::call("x").kind, ErrorKind::CallError);
        assert_eq!(RuntimeError::state("x").kind, ErrorKind::StateError);
    }

    #[test]
    fn test_new_error_has_empty_traceback() {
        let error = RuntimeError::type_error("Can't compare types 'int' and 'table'");
        assert!(error.traceback.is_empty());
    }

    #[test]
    fn test_error_implements_std_error() {
        fn takes_error(_: &dyn std::error::Error) {}
        takes_error(&RuntimeError::usage("not enough parameters"));
    }

    #[test]
    fn test_traceback_order() {
        let error = RuntimeError::field("missing")
            .with_frame(StackFrame::native("opField"))
            .with_frame(StackFrame::native("main"));
        let names: Vec<_> = error
            .traceback
            .iter()
            .map(|f| f.function_name.as_str())
            .collect();
        assert_eq!(names, ["opField", "main"]);
    }
}
