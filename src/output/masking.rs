// password masking for audit output

/// mask a password for display
/// shows first 2 and last 2 chars: "hu****r2"
/// for short passwords (< 6 chars): replaces all with "x"
pub fn mask_password(password: &str) -> String {
    let chars: Vec<char> = password.chars().collect();
    if chars.len() < 6 {
        "x".repeat(chars.len())
    } else {
        let first: String = chars[..2].iter().collect();
        let last: String = chars[chars.len() - 2..].iter().collect();
        let middle = "*".repeat(chars.len() - 4);
        format!("{first}{middle}{last}")
    }
}
