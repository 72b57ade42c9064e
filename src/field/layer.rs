/// A generation stage: turns a request into some derived data.
///
/// Implementors hold their own noise sources and parameters; `generate`
/// must not mutate them, so one layer can serve many requests.
pub trait Layer<I, O> {
    fn generate(&self, input: I) -> O;
}
