//! Call-site resolution
//!
//! Terminal log methods are `#[track_caller]`, so the location recorded by the
//! compiler already is the user's call site. A non-zero caller skip walks a
//! captured backtrace from that frame; when the runtime cannot provide frames
//! (no debug info, or the call site is not found) the call site is used.

use std::backtrace::Backtrace;
use std::panic::Location;

/// Where a record was emitted from.
#[derive(Debug, Clone, Copy)]
pub enum CallSite<'r> {
    /// Location captured through `#[track_caller]`
    Tracked(&'static Location<'static>),
    /// Location reported by another logging facade
    Explicit { file: &'r str, line: u32 },
}

/// Render the call site `skip` frames above `site`.
pub fn resolve(site: CallSite<'_>, skip: isize, short: bool) -> String {
    let (file, line) = match site {
        CallSite::Explicit { file, line } => (file.to_string(), line),
        CallSite::Tracked(location) if skip == 0 => (location.file().to_string(), location.line()),
        CallSite::Tracked(location) => walk(location, skip)
            .unwrap_or_else(|| (location.file().to_string(), location.line())),
    };

    if short {
        format!("{}:{}", short_path(&file), line)
    } else {
        format!("{}:{}", file, line)
    }
}

/// Keep the last two path segments: `a/b/c/file.rs` becomes `c/file.rs`.
pub fn short_path(path: &str) -> &str {
    let is_sep = |c: char| c == '/' || c == '\\';
    match path.rfind(is_sep) {
        Some(last) => match path[..last].rfind(is_sep) {
            Some(prev) => &path[prev + 1..],
            None => path,
        },
        None => path,
    }
}

fn walk(location: &Location<'_>, skip: isize) -> Option<(String, u32)> {
    let trace = Backtrace::force_capture().to_string();
    let frames: Vec<(String, u32)> = trace.lines().filter_map(parse_frame).collect();
    let here = frames
        .iter()
        .position(|(file, line)| *line == location.line() && same_file(file, location.file()))?;

    let last = frames.len().checked_sub(1)? as isize;
    let target = (here as isize).saturating_add(skip).clamp(0, last);
    frames.into_iter().nth(target as usize)
}

/// Parse an `at path/to/file.rs:LINE:COL` backtrace line.
fn parse_frame(line: &str) -> Option<(String, u32)> {
    let rest = line.trim_start().strip_prefix("at ")?;
    let mut parts = rest.rsplitn(3, ':');
    let _column = parts.next()?;
    let line_no = parts.next()?.parse().ok()?;
    let file = parts.next()?;
    Some((file.to_string(), line_no))
}

fn same_file(frame_file: &str, tracked_file: &str) -> bool {
    let normalize = |p: &str| p.replace('\\', "/").trim_start_matches("./").to_string();
    let frame_file = normalize(frame_file);
    let tracked_file = normalize(tracked_file);
    frame_file.ends_with(&tracked_file) || tracked_file.ends_with(&frame_file)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_path_no_separator() {
        assert_eq!(short_path("expected"), "expected");
    }

    #[test]
    fn test_short_path_one_separator() {
        assert_eq!(short_path("expected/expected"), "expected/expected");
    }

    #[test]
    fn test_short_path_keeps_last_two() {
        assert_eq!(short_path("expected/expected/expected/expected"), "expected/expected");
        assert_eq!(short_path("/abs/src/core/caller.rs"), "core/caller.rs");
        assert_eq!(short_path(r"C:\work\src\lib.rs"), r"src\lib.rs");
    }

    #[test]
    fn test_resolve_tracked_short_and_full() {
        let location = Location::caller();
        let short = resolve(CallSite::Tracked(location), 0, true);
        let full = resolve(CallSite::Tracked(location), 0, false);
        assert_eq!(short, format!("core/caller.rs:{}", location.line()));
        assert_eq!(full, format!("{}:{}", location.file(), location.line()));
    }

    #[test]
    fn test_resolve_explicit() {
        let site = CallSite::Explicit {
            file: "src/net/server.rs",
            line: 42,
        };
        assert_eq!(resolve(site, 0, true), "net/server.rs:42");
        assert_eq!(resolve(site, 5, false), "src/net/server.rs:42");
    }

    #[test]
    fn test_resolve_with_skip_never_panics() {
        let location = Location::caller();
        for skip in [isize::MIN, -10, -1, 1, 10, isize::MAX] {
            let rendered = resolve(CallSite::Tracked(location), skip, true);
            assert!(rendered.contains(':'), "unexpected caller {:?}", rendered);
        }
    }

    #[test]
    fn test_parse_frame() {
        assert_eq!(
            parse_frame("             at ./src/core/caller.rs:12:5"),
            Some(("./src/core/caller.rs".to_string(), 12))
        );
        assert_eq!(
            parse_frame("  at C:\\work\\src\\lib.rs:7:1"),
            Some(("C:\\work\\src\\lib.rs".to_string(), 7))
        );
        assert_eq!(parse_frame("   3: rust_json_logger::core::caller::walk"), None);
    }

    #[test]
    fn test_same_file() {
        assert!(same_file("/home/u/crate/src/lib.rs", "src/lib.rs"));
        assert!(same_file("./src/lib.rs", "src/lib.rs"));
        assert!(!same_file("/home/u/crate/src/main.rs", "src/lib.rs"));
    }
}
