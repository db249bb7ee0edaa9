use rand::Rng;

/// Picks a random display color as a `#rrggbb` string.
pub fn random_hex_color() -> String {
    let value: u32 = rand::thread_rng().gen_range(0..=0xFF_FFFF);
    format!("#{:06x}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_seven_char_hex() {
        for _ in 0..64 {
            let color = random_hex_color();
            assert_eq!(color.len(), 7);
            assert!(color.starts_with('#'));
            assert!(color[1..].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        }
    }
}
