/// Tunables shared across stages. All inequality tests against these
/// epsilons use `>= -eps`, never strict `>`, per the numerical design notes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub debug: bool,
    pub barycentric_epsilon: f64,
    pub parallel_normal_epsilon: f64,
    pub fill_slice_spacing: f64,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            debug: false,
            barycentric_epsilon: 1e-8,
            parallel_normal_epsilon: 1e-6,
            fill_slice_spacing: 0.005,
        }
    }
}
