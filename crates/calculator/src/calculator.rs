//! Handlers of the calculator service.
//!
//! Each handler receives the requests of a single call and sends its
//! responses. A returned Err aborts the response stream with that Status.

use duplex::{Receiver, Sender};
use proto_calculator::calculator::{
    ComputeAverageRequest, ComputeAverageResponse, FindMaximumRequest, FindMaximumResponse,
    PrimeNumberDecompositionRequest, PrimeNumberDecompositionResponse, SumRequest, SumResponse,
};
use tonic::Status;

/// Sum the two numbers of a single request.
pub async fn sum(
    mut requests: Receiver<SumRequest>,
    responses: Sender<SumResponse>,
) -> tonic::Result<()> {
    let SumRequest {
        first_number,
        second_number,
    } = requests.receive_unary().await?;
    tracing::debug!(first_number, second_number, "summing numbers");

    let Some(sum_result) = first_number.checked_add(second_number) else {
        return Err(Status::invalid_argument(format!(
            "sum of {first_number} and {second_number} overflows a 64-bit integer"
        )));
    };
    responses.send(SumResponse { sum_result }).await
}

/// Stream each prime factor of the requested number, in non-decreasing order.
pub async fn prime_number_decomposition(
    mut requests: Receiver<PrimeNumberDecompositionRequest>,
    responses: Sender<PrimeNumberDecompositionResponse>,
) -> tonic::Result<()> {
    let PrimeNumberDecompositionRequest { number } = requests.receive_unary().await?;

    if number < 1 {
        return Err(Status::invalid_argument(format!(
            "cannot decompose {number}: number must be positive"
        )));
    }
    tracing::debug!(number, "decomposing number");

    let mut factors = PrimeFactors::new(number);
    loop {
        match factors.advance(DIVISORS_PER_YIELD) {
            Some(Step::Factor(prime_factor)) => {
                responses
                    .send(PrimeNumberDecompositionResponse { prime_factor })
                    .await?
            }
            Some(Step::Pending) => {
                // Trial division of a large prime takes seconds.
                // Yield to other tasks, and stop if the call has failed.
                tokio::task::yield_now().await;
                responses.call().check()?;
            }
            None => return Ok(()),
        }
    }
}

/// Average every requested number, responding once the requests are exhausted.
pub async fn compute_average(
    mut requests: Receiver<ComputeAverageRequest>,
    responses: Sender<ComputeAverageResponse>,
) -> tonic::Result<()> {
    let mut average = Average::default();

    while let Some(ComputeAverageRequest { number }) = requests.receive().await? {
        average.add(number);
    }
    let Some(average) = average.get() else {
        return Err(Status::invalid_argument(
            "cannot compute the average of zero numbers",
        ));
    };
    responses.send(ComputeAverageResponse { average }).await
}

/// Respond with each requested number which is a new maximum.
pub async fn find_maximum(
    mut requests: Receiver<FindMaximumRequest>,
    responses: Sender<FindMaximumResponse>,
) -> tonic::Result<()> {
    let mut maximum = RunningMaximum::default();

    while let Some(FindMaximumRequest { number }) = requests.receive().await? {
        if let Some(maximum) = maximum.observe(number) {
            responses.send(FindMaximumResponse { maximum }).await?;
        }
    }
    Ok(())
}

/// Number of candidate divisors tried by prime_number_decomposition
/// before it yields to other tasks.
const DIVISORS_PER_YIELD: u32 = 1 << 16;

/// PrimeFactors iterates over the prime factors of a number, with
/// multiplicity and in non-decreasing order, using trial division.
/// Numbers less than two have no factors.
#[derive(Debug, Clone)]
pub struct PrimeFactors {
    remaining: i64,
    divisor: i64,
}

/// Step is the progress of [`PrimeFactors::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// The next prime factor.
    Factor(i64),
    /// The budget of divisors ran out before a factor was found.
    Pending,
}

impl PrimeFactors {
    pub fn new(number: i64) -> Self {
        Self {
            remaining: number,
            divisor: 2,
        }
    }

    /// Try at most `budget` candidate divisors in search of the next factor.
    /// Returns None once every factor has been returned.
    pub fn advance(&mut self, budget: u32) -> Option<Step> {
        for _ in 0..budget {
            if self.remaining <= 1 {
                return None;
            }
            // Once divisor² exceeds the remainder, the remainder is itself prime.
            if self.divisor > self.remaining / self.divisor {
                let factor = self.remaining;
                self.remaining = 1;
                return Some(Step::Factor(factor));
            }
            if self.remaining % self.divisor == 0 {
                self.remaining /= self.divisor;
                return Some(Step::Factor(self.divisor));
            }
            // Only odd divisors follow 2.
            self.divisor += if self.divisor == 2 { 1 } else { 2 };
        }
        (self.remaining > 1).then_some(Step::Pending)
    }
}

impl Iterator for PrimeFactors {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        loop {
            match self.advance(u32::MAX)? {
                Step::Factor(factor) => return Some(factor),
                Step::Pending => continue,
            }
        }
    }
}

#[derive(Debug, Default)]
struct Average {
    sum: i64,
    count: u64,
}

impl Average {
    fn add(&mut self, number: i32) {
        self.sum += i64::from(number);
        self.count += 1;
    }

    fn get(&self) -> Option<f64> {
        (self.count != 0).then(|| self.sum as f64 / self.count as f64)
    }
}

// RunningMaximum reports each number which is greater than every number
// before it. The first number is always reported.
#[derive(Debug, Default)]
struct RunningMaximum(Option<i32>);

impl RunningMaximum {
    fn observe(&mut self, number: i32) -> Option<i32> {
        match self.0 {
            Some(maximum) if number <= maximum => None,
            _ => {
                self.0 = Some(number);
                Some(number)
            }
        }
    }
}
