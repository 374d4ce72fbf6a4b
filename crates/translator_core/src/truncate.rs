/// Shortens `name` for display: keeps a `max_len - tail_len` prefix and a `tail_len`
/// suffix joined by `..`. Names of at most `max_len` characters are returned as-is.
pub fn truncate_display_name(name: &str, max_len: usize, tail_len: usize) -> String {
    let char_count = name.chars().count();
    if char_count <= max_len {
        return name.to_string();
    }

    let tail_len = tail_len.min(char_count);
    let head_len = max_len.saturating_sub(tail_len);
    let head: String = name.chars().take(head_len).collect();
    let tail: String = name.chars().skip(char_count - tail_len).collect();
    format!("{head}..{tail}")
}
