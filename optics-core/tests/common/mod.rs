use optics_core::{DataSource, DataSourceError};

/// One-dimensional source measuring absolute difference.
#[derive(Clone)]
pub struct Line {
    data: Vec<f64>,
}

impl Line {
    #[must_use]
    pub fn new(data: Vec<f64>) -> Self {
        Self { data }
    }
}

impl DataSource for Line {
    fn len(&self) -> usize {
        self.data.len()
    }

    fn name(&self) -> &str {
        "line"
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        let a = self
            .data
            .get(i)
            .ok_or(DataSourceError::OutOfBounds { index: i })?;
        let b = self
            .data
            .get(j)
            .ok_or(DataSourceError::OutOfBounds { index: j })?;
        Ok((a - b).abs())
    }
}

/// Source whose distances come from a caller-supplied closure.
pub struct Scripted<F> {
    len: usize,
    distance: F,
}

impl<F> Scripted<F>
where
    F: Fn(usize, usize) -> Result<f64, DataSourceError> + Sync,
{
    #[must_use]
    pub fn new(len: usize, distance: F) -> Self {
        Self { len, distance }
    }
}

impl<F> DataSource for Scripted<F>
where
    F: Fn(usize, usize) -> Result<f64, DataSourceError> + Sync,
{
    fn len(&self) -> usize {
        self.len
    }

    fn name(&self) -> &str {
        "scripted"
    }

    fn distance(&self, i: usize, j: usize) -> Result<f64, DataSourceError> {
        (self.distance)(i, j)
    }
}
