/// Monotonic id source owned by a single scene. Ids start at 1 and are never reused.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    next: usize,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }
}

#[cfg(test)]
mod tests {
    use super::IdGenerator;

    #[test]
    fn test_ids_are_not_shared_between_generators() {
        let mut a = IdGenerator::new();
        let mut b = IdGenerator::new();
        assert_eq!(a.generate_id(), 1);
        assert_eq!(a.generate_id(), 2);
        assert_eq!(b.generate_id(), 1);
    }
}
