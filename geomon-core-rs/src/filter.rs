//! Filter contract shared by the concrete filters in [`crate::filters`].

/// Matches a reference collection against extra context, producing a
/// derived collection
///
/// Implementations must not mutate their inputs and must be deterministic
/// for identical inputs. Input order is significant.
pub trait Filter<S, C> {
    /// The derived collection
    type Output;

    /// Applies the filter to `subjects` using `context`
    fn apply(&self, subjects: &[S], context: &C) -> Self::Output;
}
