//! Parallel output port trait

/// A group of output lines written together as one bit pattern
///
/// Bit 0 drives the first line. Writes are infallible: the port is
/// either on-chip GPIO or a latch that cannot report errors.
pub trait PatternOutput {
    fn write_pattern(&mut self, pattern: u8);
}

impl<T: PatternOutput + ?Sized> PatternOutput for &mut T {
    fn write_pattern(&mut self, pattern: u8) {
        (**self).write_pattern(pattern)
    }
}
