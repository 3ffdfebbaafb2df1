//! Colours handed to the 2D renderer with every visual vector

/// One immutable colour table shared by every vector operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub vector_a: &'static str,
    pub vector_b: &'static str,
    pub result: &'static str,
    pub projection: &'static str,
    pub normalized: &'static str,
    /// Helper segments such as the projection distance
    pub connector: &'static str,
}

pub static PALETTE: Palette = Palette {
    vector_a: "#3b82f6",
    vector_b: "#10b981",
    result: "#ef4444",
    projection: "#8b5cf6",
    normalized: "#f59e0b",
    connector: "#94a3b8",
};

impl Palette {
    /// Colour of `k × A`: red when the direction flips, green otherwise
    pub fn scaled(&self, k: f64) -> &'static str {
        if k < 0.0 { self.result } else { self.vector_b }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scaled_colour() {
        assert_eq!(PALETTE.scaled(-2.0), "#ef4444");
        assert_eq!(PALETTE.scaled(0.0), "#10b981");
        assert_eq!(PALETTE.scaled(3.0), PALETTE.vector_b);
    }
}
