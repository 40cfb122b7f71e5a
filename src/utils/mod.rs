pub mod csv_handler;
pub mod url_validator;

/// 解析字符串开头的整数，行为与宽松的 intval 一致
///
/// 跳过前导空白，接受一个可选的 `+`/`-`，然后读取连续数字；
/// 没有数字或溢出时返回 0。
///
/// ```
/// use walink::utils::leading_int;
/// assert_eq!(leading_int("42abc"), 42);
/// assert_eq!(leading_int("  -7"), -7);
/// assert_eq!(leading_int("abc"), 0);
/// ```
pub fn leading_int(s: &str) -> i64 {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let end = digits
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return 0;
    }

    match digits[..end].parse::<i64>() {
        Ok(n) if negative => -n,
        Ok(n) => n,
        Err(_) => 0,
    }
}

/// 由标题生成 URL slug：小写字母数字，其余字符折叠为单个 `-`
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_dash = false;

    for ch in title.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
