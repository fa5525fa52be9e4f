use std::fmt::{self, Display};

/// Method is an RPC served by the calculator and greet services.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Sum,
    PrimeNumberDecomposition,
    ComputeAverage,
    FindMaximum,
    Greet,
    GreetManyTimes,
    LongGreet,
    GreetEveryone,
}

impl Method {
    /// Path of the method, which identifies it on the wire.
    pub fn path(self) -> &'static str {
        match self {
            Method::Sum => "/calculator.CalculatorService/Sum",
            Method::PrimeNumberDecomposition => {
                "/calculator.CalculatorService/PrimeNumberDecomposition"
            }
            Method::ComputeAverage => "/calculator.CalculatorService/ComputeAverage",
            Method::FindMaximum => "/calculator.CalculatorService/FindMaximum",
            Method::Greet => "/greet.GreetService/Greet",
            Method::GreetManyTimes => "/greet.GreetService/GreetManyTimes",
            Method::LongGreet => "/greet.GreetService/LongGreet",
            Method::GreetEveryone => "/greet.GreetService/GreetEveryone",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod test {
    use super::Method;
    use crate::Server;
    use proto_grpc::calculator::calculator_service_server::CalculatorServiceServer;
    use proto_grpc::greet::greet_service_server::GreetServiceServer;
    use tonic::server::NamedService;

    #[test]
    fn test_paths_are_of_served_services() {
        let calculator = format!("/{}/", CalculatorServiceServer::<Server>::NAME);
        let greet = format!("/{}/", GreetServiceServer::<Server>::NAME);

        for method in [
            Method::Sum,
            Method::PrimeNumberDecomposition,
            Method::ComputeAverage,
            Method::FindMaximum,
        ] {
            assert!(method.path().starts_with(&calculator), "{method}");
        }
        for method in [
            Method::Greet,
            Method::GreetManyTimes,
            Method::LongGreet,
            Method::GreetEveryone,
        ] {
            assert!(method.path().starts_with(&greet), "{method}");
        }
        assert_eq!(Method::FindMaximum.to_string(), "/calculator.CalculatorService/FindMaximum");
    }
}
