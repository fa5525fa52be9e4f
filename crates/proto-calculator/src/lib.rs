pub mod calculator;
pub mod greet;

impl greet::Greeting {
    pub fn new(first_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            ..Default::default()
        }
    }
}
