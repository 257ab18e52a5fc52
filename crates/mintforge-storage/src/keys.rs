//! Shared key assembly and content-type inference.
//!
//! All entry points build keys through [`join_key`] so normalization stays in
//! one place: runs of `/` collapse to a single slash and keys never start
//! with `/`.

use chrono::Utc;

/// Join path segments into a normalized storage key.
///
/// Empty segments are skipped, runs of `/` collapse to one, and a leading
/// slash is dropped. Trailing slashes on segments (a common shape for
/// configured prefixes like `uploads/`) therefore never produce `//`.
pub fn join_key<'a>(segments: impl IntoIterator<Item = &'a str>) -> String {
    let joined = segments
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/");

    let mut key = String::with_capacity(joined.len());
    let mut previous_was_slash = false;
    for ch in joined.chars() {
        if ch == '/' {
            if !previous_was_slash && !key.is_empty() {
                key.push('/');
            }
            previous_was_slash = true;
        } else {
            key.push(ch);
            previous_was_slash = false;
        }
    }
    key
}

/// Generate a filename for a file upload: `{millis}-{basename}`.
///
/// The timestamp is what keeps repeated uploads of the same source file from
/// colliding; callers supplying explicit filenames get no such protection.
pub fn timestamped_file_name(base_name: &str) -> String {
    format!("{}-{}", Utc::now().timestamp_millis(), base_name)
}

/// Generate a default filename for a JSON upload: `{millis}.json`.
pub fn timestamped_json_name() -> String {
    format!("{}.json", Utc::now().timestamp_millis())
}

/// Infer a MIME type from a filename extension.
///
/// Closed enumeration: the formats the image pipeline produces. Everything
/// else uploads as `application/octet-stream`.
pub fn content_type_for(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_key_collapses_duplicate_slashes() {
        assert_eq!(join_key(["uploads/", "x.png"]), "uploads/x.png");
        assert_eq!(join_key(["uploads//", "/sub/", "x.json"]), "uploads/sub/x.json");
    }

    #[test]
    fn test_join_key_skips_empty_segments() {
        assert_eq!(join_key(["uploads", "", "x.json"]), "uploads/x.json");
        assert_eq!(join_key(["", "x.json"]), "x.json");
    }

    #[test]
    fn test_join_key_drops_leading_slash() {
        assert_eq!(join_key(["/uploads", "x.png"]), "uploads/x.png");
    }

    #[test]
    fn test_content_type_known_extensions() {
        assert_eq!(content_type_for("photo.png"), "image/png");
        assert_eq!(content_type_for("photo.jpg"), "image/jpeg");
        assert_eq!(content_type_for("photo.jpeg"), "image/jpeg");
        assert_eq!(content_type_for("anim.gif"), "image/gif");
        assert_eq!(content_type_for("photo.webp"), "image/webp");
    }

    #[test]
    fn test_content_type_is_case_insensitive() {
        assert_eq!(content_type_for("photo.PNG"), "image/png");
        assert_eq!(content_type_for("photo.Jpeg"), "image/jpeg");
    }

    #[test]
    fn test_content_type_falls_back_to_octet_stream() {
        assert_eq!(content_type_for("data.xyz"), "application/octet-stream");
        assert_eq!(content_type_for("no_extension"), "application/octet-stream");
    }

    #[test]
    fn test_timestamped_names() {
        let name = timestamped_file_name("photo.png");
        assert!(name.ends_with("-photo.png"), "got: {}", name);
        let (stamp, _) = name.split_once('-').unwrap();
        assert!(stamp.parse::<i64>().is_ok(), "stamp should be numeric: {}", stamp);

        let json_name = timestamped_json_name();
        assert!(json_name.ends_with(".json"), "got: {}", json_name);
    }
}
