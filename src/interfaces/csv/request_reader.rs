use crate::domain::payment::PaymentRequest;
use crate::error::AppError;
use std::io::Read;

/// Reads payment requests from a CSV source with an `id,amount` header.
///
/// Rows are only parsed here; an empty id or non-positive amount is left for
/// the gateway to reject when the batch reaches that row.
pub struct PaymentRequestReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> PaymentRequestReader<R> {
    /// Wraps `source`, trimming whitespace around every field.
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Returns an iterator that lazily reads and deserializes requests.
    pub fn requests(self) -> impl Iterator<Item = Result<PaymentRequest, AppError>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(AppError::from))
    }

    /// Reads every row, failing on the first one that cannot be parsed.
    pub fn read_all(self) -> Result<Vec<PaymentRequest>, AppError> {
        self.requests().collect()
    }
}
