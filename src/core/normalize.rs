// identifier normalizers shared by the type rules

/// Sentinel the parser uses when it could not name an item or ability.
pub const UNKNOWN_ID: &str = "dota_unknown";
pub const ITEM_PREFIX: &str = "item_";
pub const ILLUSION_PREFIX: &str = "illusion_";

/// Strips the `item_` prefix and maps the unknown sentinel to `None`.
/// Borrows from the input, so the caller's string is never touched.
pub fn translate(id: &str) -> Option<&str> {
    if id == UNKNOWN_ID {
        return None;
    }
    Some(id.strip_prefix(ITEM_PREFIX).unwrap_or(id))
}

pub fn translate_opt(id: Option<&str>) -> Option<String> {
    id.and_then(translate).map(str::to_string)
}

//illusions get their own key so they never count as the real hero
pub fn illusion_key(name: &str, is_illusion: bool) -> String {
    if is_illusion {
        format!("{ILLUSION_PREFIX}{name}")
    } else {
        name.to_string()
    }
}
