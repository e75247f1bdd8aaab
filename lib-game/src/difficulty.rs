/// How much every successful catch adds to the speed multiplier.
pub const DIFFICULTY_STEP: f32 = 0.012;

/// Progressive difficulty. Only grows during a session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    click_count: u32,
    speed_multiplier: f32,
}

impl Difficulty {
    pub fn new() -> Self {
        Self {
            click_count: 0,
            speed_multiplier: Self::multiplier_for(0),
        }
    }

    pub fn multiplier_for(click_count: u32) -> f32 {
        1.0 + click_count as f32 * DIFFICULTY_STEP
    }

    /// Counts a catch and returns the new multiplier.
    pub fn register_click(&mut self) -> f32 {
        self.click_count += 1;
        self.speed_multiplier = Self::multiplier_for(self.click_count);

        self.speed_multiplier
    }

    pub fn click_count(&self) -> u32 {
        self.click_count
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// The multiplier as a whole percentage, rounded down.
    pub fn percent(&self) -> u32 {
        (self.speed_multiplier * 100.0) as u32
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multiplier_formula() {
        let mut difficulty = Difficulty::new();
        assert_eq!(difficulty.speed_multiplier(), 1.0);
        assert_eq!(difficulty.percent(), 100);

        for c in 1..=200 {
            let prev = difficulty.speed_multiplier();
            let next = difficulty.register_click();

            assert_eq!(difficulty.click_count(), c);
            assert_eq!(next, 1.0 + c as f32 * 0.012);
            assert!(next > prev);
        }
    }

    #[test]
    fn test_percent_after_one_click() {
        let mut difficulty = Difficulty::new();
        difficulty.register_click();

        assert_eq!(difficulty.percent(), 101);
    }
}
