//! Password strength scoring.
//!
//! A deterministic 0-100 score built from length, character classes and
//! a few penalties.  The score is a rough UI hint, not an entropy
//! estimate.

/// Patterns that make a password weak no matter what follows them.
const WEAK_PREFIXES: [&str; 3] = ["password", "123456", "qwerty"];

/// Score `password` from 0 (empty or trivial) to 100.
///
/// - length: 4 points per character, up to 40
/// - each class present (lowercase, uppercase, digit, symbol): 10 points
/// - variety bonus: 5 more points per class present
/// - -10 if made of a single class (all lowercase, all uppercase or all digits)
/// - -10 if any character repeats three or more times in a row
/// - -30 if it starts with a well-known weak pattern, ignoring case
pub fn calculate_password_strength(password: &str) -> u8 {
    if password.is_empty() {
        return 0;
    }

    let length = password.chars().count();
    let mut score = i32::try_from(length.min(10)).unwrap_or(10) * 4;

    let has_lower = password.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = password.chars().any(|c| c.is_ascii_uppercase());
    let has_digit = password.chars().any(|c| c.is_ascii_digit());
    let has_symbol = password.chars().any(|c| !c.is_ascii_alphanumeric());

    let classes = [has_lower, has_upper, has_digit, has_symbol]
        .iter()
        .filter(|present| **present)
        .count() as i32;
    score += classes * 10;
    score += classes * 5;

    if single_class(password) {
        score -= 10;
    }
    if has_triple_repeat(password) {
        score -= 10;
    }
    if starts_with_weak_pattern(password) {
        score -= 30;
    }

    score.clamp(0, 100) as u8
}

/// Human label for a score.
pub fn strength_label(score: u8) -> &'static str {
    Strength::from_score(score).label()
}

/// Hex colour for a score, red through green.
pub fn strength_color(score: u8) -> &'static str {
    Strength::from_score(score).color()
}

/// The five strength bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    VeryWeak,
    Weak,
    Fair,
    Strong,
    VeryStrong,
}

impl Strength {
    pub fn from_score(score: u8) -> Self {
        match score {
            0..=19 => Self::VeryWeak,
            20..=39 => Self::Weak,
            40..=59 => Self::Fair,
            60..=79 => Self::Strong,
            _ => Self::VeryStrong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::VeryWeak => "Very Weak",
            Self::Weak => "Weak",
            Self::Fair => "Fair",
            Self::Strong => "Strong",
            Self::VeryStrong => "Very Strong",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Self::VeryWeak => "#ef4444",
            Self::Weak => "#f97316",
            Self::Fair => "#eab308",
            Self::Strong => "#22c55e",
            Self::VeryStrong => "#10b981",
        }
    }
}

fn single_class(password: &str) -> bool {
    password.chars().all(|c| c.is_ascii_lowercase())
        || password.chars().all(|c| c.is_ascii_uppercase())
        || password.chars().all(|c| c.is_ascii_digit())
}

fn has_triple_repeat(password: &str) -> bool {
    let chars: Vec<char> = password.chars().collect();
    chars.windows(3).any(|w| w[0] == w[1] && w[1] == w[2])
}

fn starts_with_weak_pattern(password: &str) -> bool {
    let lowered = password.to_lowercase();
    WEAK_PREFIXES.iter().any(|p| lowered.starts_with(p))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scores_zero() {
        assert_eq!(calculate_password_strength(""), 0);
    }

    #[test]
    fn single_lowercase_class() {
        // 8*4 + 10 + 5 - 10 (single class) - 10 (aaa run)
        assert_eq!(calculate_password_strength("aaaaaaaa"), 27);
    }

    #[test]
    fn all_classes_mixed() {
        // 8*4 + 40 + 20
        assert_eq!(calculate_password_strength("aB3$aB3$"), 92);
    }

    #[test]
    fn length_contribution_caps_at_forty() {
        // 12 distinct-ish lowercase letters: 40 + 10 + 5 - 10
        assert_eq!(calculate_password_strength("abcdefghijkl"), 45);
    }

    #[test]
    fn weak_prefix_is_case_insensitive() {
        // 11*4 capped to 40, lower+upper+digit = 30 + 15, minus 30
        assert_eq!(calculate_password_strength("PassWord123"), 55);
    }

    #[test]
    fn mixed_case_letters_are_not_single_class() {
        // 4*4 + 20 + 10
        assert_eq!(calculate_password_strength("abCD"), 46);
    }

    #[test]
    fn score_is_clamped_at_zero() {
        // 6*4 + 10 + 5 - 10 (single class) - 30 (weak prefix) = -1
        assert_eq!(calculate_password_strength("123456"), 0);
        assert_eq!(calculate_password_strength("qwerty"), 0);
    }

    #[test]
    fn label_thresholds() {
        assert_eq!(strength_label(0), "Very Weak");
        assert_eq!(strength_label(19), "Very Weak");
        assert_eq!(strength_label(20), "Weak");
        assert_eq!(strength_label(39), "Weak");
        assert_eq!(strength_label(40), "Fair");
        assert_eq!(strength_label(59), "Fair");
        assert_eq!(strength_label(60), "Strong");
        assert_eq!(strength_label(79), "Strong");
        assert_eq!(strength_label(80), "Very Strong");
        assert_eq!(strength_label(100), "Very Strong");
    }

    #[test]
    fn color_ramp() {
        assert_eq!(strength_color(10), "#ef4444");
        assert_eq!(strength_color(30), "#f97316");
        assert_eq!(strength_color(50), "#eab308");
        assert_eq!(strength_color(70), "#22c55e");
        assert_eq!(strength_color(90), "#10b981");
    }
}
