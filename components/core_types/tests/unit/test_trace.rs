//! Unit tests for StackFrame

use core_types::StackFrame;

#[test]
fn test_native_frame_display() {
    let frame = StackFrame::native("opCmp");
    assert_eq!(frame.to_string(), "opCmp (native)");
}

#[test]
fn test_script_frame_display() {
    let frame = StackFrame {
        function_name: "main".to_string(),
        native: false,
    };
    assert_eq!(frame.to_string(), "main");
}
