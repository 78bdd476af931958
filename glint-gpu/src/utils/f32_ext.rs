pub trait F32Ext: Sized {
    fn sqr(self) -> Self;

    /// Clamps into `<0.0, 1.0>`.
    fn saturate(self) -> Self;

    /// Returns `percent` percents of `self`.
    fn percent(self, percent: f32) -> Self;
}

impl F32Ext for f32 {
    fn sqr(self) -> Self {
        self * self
    }

    fn saturate(self) -> Self {
        self.max(0.0).min(1.0)
    }

    fn percent(self, percent: f32) -> Self {
        self * percent / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent() {
        assert_eq!(0.5, 25f32.percent(2.0));
        assert_eq!(0.0, 25f32.percent(0.0));
    }

    #[test]
    fn saturate() {
        assert_eq!(0.0, (-1.0f32).saturate());
        assert_eq!(0.25, 0.25f32.saturate());
        assert_eq!(1.0, 3.0f32.saturate());
    }
}
