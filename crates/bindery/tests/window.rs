//! Window tests against the real native library.
//!
//! These open windows and need a display, so they are ignored by default:
//! `cargo test -p bindery -- --ignored --test-threads=1`

use approx::assert_relative_eq;
use bindery::prelude::*;

fn pump() {
    for _ in 0..5 {
        poll_events().unwrap();
        std::thread::sleep(std::time::Duration::from_millis(10));
    }
}

#[test]
#[ignore = "requires a display"]
fn create_window_holds_video_subsystem() {
    let before = VideoGuard::active_count();
    {
        let window = Window::create("CreateWindow", 320, 240, WindowFlags::NOT_FOCUSABLE).unwrap();
        pump();
        assert!(window.is_valid());
        assert!(VideoGuard::active_count() > before);
    }
    assert_eq!(VideoGuard::active_count(), before);
}

#[test]
#[ignore = "requires a display"]
fn default_window_uses_default_size() {
    let window = Window::with_defaults().unwrap();
    pump();
    assert_eq!(window.size().unwrap(), (Window::DEFAULT_WIDTH, Window::DEFAULT_HEIGHT));
}

#[test]
#[ignore = "requires a display"]
fn clones_share_the_native_window() {
    let window = Window::create("Shared", 320, 240, WindowFlags::HIDDEN).unwrap();
    let copy = window.clone();
    assert_eq!(window, copy);
    assert_eq!(window.use_count(), 2);

    copy.set_size(300, 200).unwrap();
    pump();
    assert_eq!(window.size().unwrap(), (300, 200));
}

#[test]
#[ignore = "requires a display"]
fn hidden_flag_round_trips() {
    let window = Window::create("Hidden", 320, 240, WindowFlags::HIDDEN).unwrap();
    assert!(window.is_hidden().unwrap());

    window.show().unwrap();
    pump();
    assert!(!window.is_hidden().unwrap());

    window.hide().unwrap();
    pump();
    assert!(window.is_hidden().unwrap());
}

#[test]
#[ignore = "requires a display"]
fn resizable_and_bordered_toggle() {
    let window = Window::create("Toggles", 320, 240, WindowFlags::HIDDEN).unwrap();
    assert!(!window.is_resizable().unwrap());

    window.set_resizable(true).unwrap();
    assert!(window.is_resizable().unwrap());

    window.set_bordered(false).unwrap();
    assert!(window.is_borderless().unwrap());

    window.set_always_on_top(true).unwrap();
    assert!(window.is_always_on_top().unwrap());
}

#[test]
#[ignore = "requires a display"]
fn opacity_is_clamped() {
    let window = Window::create("Opacity", 320, 240, WindowFlags::empty()).unwrap();
    pump();

    window.set_opacity(0.5).unwrap();
    assert_relative_eq!(window.opacity().unwrap(), 0.5, epsilon = 0.01);

    window.set_opacity(3.0).unwrap();
    assert_relative_eq!(window.opacity().unwrap(), 1.0, epsilon = 0.01);
}

#[test]
#[ignore = "requires a display"]
fn should_close_flag() {
    let window = Window::create("Close", 320, 240, WindowFlags::HIDDEN).unwrap();
    assert!(!window.should_close().unwrap());
    window.set_should_close(true).unwrap();
    assert!(window.should_close().unwrap());
}

#[test]
#[ignore = "requires a display"]
fn windowed_window_has_null_monitor() {
    let window = Window::create("Monitor", 320, 240, WindowFlags::HIDDEN).unwrap();
    assert!(window.monitor().unwrap().is_null());
    assert!(Monitor::primary().unwrap().is_valid());
    assert!(!Monitor::all().is_empty());
}

#[test]
#[ignore = "requires a display"]
fn current_context_shares_the_live_window() {
    let window = Window::create("Context", 320, 240, WindowFlags::HIDDEN | WindowFlags::OPENGL).unwrap();
    window.make_context_current().unwrap();

    let current = Window::current_context();
    assert_eq!(current, window);
    assert_eq!(window.use_count(), 2);

    drop(window);
    assert!(current.is_valid());
    assert!(current.should_close().is_ok());

    drop(current);
    assert!(Window::current_context().is_null());
}

#[test]
#[ignore = "requires a display"]
fn checked_getters_succeed_on_live_handles() {
    let window = Window::create("Opaque", 320, 240, WindowFlags::HIDDEN).unwrap();
    assert_relative_eq!(window.opacity().unwrap(), 1.0, epsilon = 0.01);

    let monitor = Monitor::primary().unwrap();
    monitor.position().unwrap();
    let (x_scale, y_scale) = monitor.content_scale().unwrap();
    assert!(x_scale > 0.0 && y_scale > 0.0);
}

#[test]
#[ignore = "requires a display"]
fn config_window_applies_position_and_opacity() {
    let config = WindowConfig {
        title: String::from("Configured"),
        width: 320,
        height: 240,
        position: Some((100, 100)),
        opacity: Some(0.75),
        ..WindowConfig::default()
    };
    let window = Window::from_config(&config).unwrap();
    pump();
    assert_relative_eq!(window.opacity().unwrap(), 0.75, epsilon = 0.01);
}

#[test]
#[ignore = "requires a display"]
fn standard_cursor_and_clipboard() {
    let window = Window::create("Cursor", 320, 240, WindowFlags::empty()).unwrap();
    let cursor = Cursor::standard(CursorShape::Hand).unwrap();
    window.set_cursor(&cursor).unwrap();
    window.set_cursor(&Cursor::null()).unwrap();

    let clipboard = Clipboard::open().unwrap();
    clipboard.set_text("bindery clipboard").unwrap();
    assert_eq!(clipboard.text().unwrap().as_deref(), Some("bindery clipboard"));
    assert!(clipboard.has_text().unwrap());
}

#[test]
#[ignore = "requires a display"]
fn title_with_interior_nul_is_rejected() {
    let window = Window::create("Title", 320, 240, WindowFlags::HIDDEN).unwrap();
    assert!(matches!(window.set_title("bad\0title"), Err(PlatformError::InvalidString(_))));
}
