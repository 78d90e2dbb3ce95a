//! Bounded-size rendering of large traces.
//!
//! An accumulating iterator folds runs of consecutive points into one
//! representative point. The first and the last point of the source are
//! always emitted unchanged, and discontinuities are never folded.

use std::fmt;
use std::iter::{FusedIterator, Peekable};

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{DataPoint, Range};

/// Folds points into one representative point.
pub trait AccumulationFunction: fmt::Debug {
    fn add_point(&mut self, point: DataPoint);

    /// Folded point of everything added since the last call; resets the
    /// state. `None` when nothing was added.
    fn take_accumulated(&mut self) -> Option<DataPoint>;
}

impl<F: AccumulationFunction + ?Sized> AccumulationFunction for Box<F> {
    fn add_point(&mut self, point: DataPoint) {
        (**self).add_point(point);
    }

    fn take_accumulated(&mut self) -> Option<DataPoint> {
        (**self).take_accumulated()
    }
}

/// Mean of x and mean of y.
#[derive(Debug, Clone, Default)]
pub struct ArithmeticMean {
    sum_x: f64,
    sum_y: f64,
    count: usize,
}

impl AccumulationFunction for ArithmeticMean {
    fn add_point(&mut self, point: DataPoint) {
        self.sum_x += point.x;
        self.sum_y += point.y;
        self.count += 1;
    }

    fn take_accumulated(&mut self) -> Option<DataPoint> {
        if self.count == 0 {
            return None;
        }
        let folded = if self.count == 1 {
            DataPoint::new(self.sum_x, self.sum_y)
        } else {
            let count = self.count as f64;
            DataPoint::new(self.sum_x / count, self.sum_y / count)
        };
        *self = Self::default();
        Some(folded)
    }
}

/// Keeps the original point with the highest y.
#[derive(Debug, Clone, Default)]
pub struct MaxY {
    best: Option<DataPoint>,
}

impl AccumulationFunction for MaxY {
    fn add_point(&mut self, point: DataPoint) {
        if self.best.is_none_or(|best| point.y > best.y) {
            self.best = Some(point);
        }
    }

    fn take_accumulated(&mut self) -> Option<DataPoint> {
        self.best.take()
    }
}

/// Keeps the original point with the lowest y.
#[derive(Debug, Clone, Default)]
pub struct MinY {
    best: Option<DataPoint>,
}

impl AccumulationFunction for MinY {
    fn add_point(&mut self, point: DataPoint) {
        if self.best.is_none_or(|best| point.y < best.y) {
            self.best = Some(point);
        }
    }

    fn take_accumulated(&mut self) -> Option<DataPoint> {
        self.best.take()
    }
}

/// Serializable choice of built-in accumulation function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationFunctionKind {
    #[default]
    ArithmeticMean,
    MaxY,
    MinY,
}

impl AccumulationFunctionKind {
    #[must_use]
    pub fn build(self) -> Box<dyn AccumulationFunction + Send> {
        match self {
            Self::ArithmeticMean => Box::new(ArithmeticMean::default()),
            Self::MaxY => Box::new(MaxY::default()),
            Self::MinY => Box::new(MinY::default()),
        }
    }
}

/// How a trace is reduced before clipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AccumulationStrategy {
    /// Points pass through untouched.
    #[default]
    NoAccumulation,
    /// Every `ceil(total / target)` consecutive points become one.
    AccumulateAmountOfPoints,
    /// The visible x range is cut into `target` equal buckets and each run
    /// of points inside one bucket becomes one. Needs ascending x.
    AccumulateXRangeWithRespectToDensity,
}

/// Sizing inputs of one accumulation pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccumulationRequest {
    pub target_count: usize,
    pub total_count: usize,
    /// Visible x range in data units; only the density strategy reads it.
    pub visible_x: Range,
}

impl AccumulationStrategy {
    /// Wraps `source` according to this strategy.
    pub fn apply<I, F>(
        self,
        source: I,
        request: AccumulationRequest,
        function: F,
    ) -> Accumulated<I::IntoIter, F>
    where
        I: IntoIterator<Item = DataPoint>,
        F: AccumulationFunction,
    {
        let source = source.into_iter();
        if request.target_count == 0 || request.total_count <= request.target_count {
            return Accumulated::Bypass(source);
        }

        match self {
            Self::NoAccumulation => Accumulated::Bypass(source),
            Self::AccumulateAmountOfPoints => {
                wrap(source, request.target_count, request.total_count, function)
            }
            Self::AccumulateXRangeWithRespectToDensity => {
                let visible = request.visible_x;
                let width = visible.extent() / request.target_count as f64;
                if !visible.min.is_finite() || !(width > 0.0) || !width.is_finite() {
                    return Accumulated::Bypass(source);
                }
                debug!(
                    buckets = request.target_count,
                    bucket_width = width,
                    total = request.total_count,
                    "accumulating trace by x density"
                );
                Accumulated::Folding(AccumulatingIterator::new(
                    source,
                    function,
                    Grouping::XBucket {
                        origin: visible.min,
                        width,
                        current: None,
                    },
                ))
            }
        }
    }
}

/// Folds `source` down to roughly `target_count` points.
///
/// `total_count` is the length of `source`. Nothing is folded when it does
/// not exceed `target_count` (or `target_count` is 0).
pub fn wrap<I, F>(
    source: I,
    target_count: usize,
    total_count: usize,
    function: F,
) -> Accumulated<I::IntoIter, F>
where
    I: IntoIterator<Item = DataPoint>,
    F: AccumulationFunction,
{
    let source = source.into_iter();
    if target_count == 0 || total_count <= target_count {
        return Accumulated::Bypass(source);
    }

    let per_output = total_count.div_ceil(target_count);
    debug!(
        target = target_count,
        total = total_count,
        per_output,
        "accumulating trace by point count"
    );
    Accumulated::Folding(AccumulatingIterator::new(
        source,
        function,
        Grouping::Count { per_output },
    ))
}

/// Iterator returned by [`wrap`] and [`AccumulationStrategy::apply`].
#[derive(Debug)]
pub enum Accumulated<I: Iterator<Item = DataPoint>, F> {
    Bypass(I),
    Folding(AccumulatingIterator<I, F>),
}

impl<I, F> Iterator for Accumulated<I, F>
where
    I: Iterator<Item = DataPoint>,
    F: AccumulationFunction,
{
    type Item = DataPoint;

    fn next(&mut self) -> Option<DataPoint> {
        match self {
            Self::Bypass(source) => source.next(),
            Self::Folding(folding) => folding.next(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Grouping {
    Count {
        per_output: usize,
    },
    XBucket {
        origin: f64,
        width: f64,
        current: Option<i64>,
    },
}

impl Grouping {
    /// Whether `point` opens a new group; updates the tracked bucket.
    fn opens_group(&mut self, point: DataPoint, group_len: usize) -> bool {
        match self {
            Self::Count { per_output } => group_len >= *per_output,
            Self::XBucket {
                origin,
                width,
                current,
            } => {
                let bucket = ((point.x - *origin) / *width).floor() as i64;
                let opens = *current != Some(bucket);
                *current = Some(bucket);
                opens
            }
        }
    }

    fn restart(&mut self) {
        if let Self::XBucket { current, .. } = self {
            *current = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    AwaitingFirst,
    Accumulating,
    Finished,
}

impl<I, F> FusedIterator for Accumulated<I, F>
where
    I: FusedIterator<Item = DataPoint>,
    F: AccumulationFunction,
{
}

/// Single-pass folding iterator; build a fresh one per render pass.
pub struct AccumulatingIterator<I: Iterator<Item = DataPoint>, F> {
    source: Peekable<I>,
    function: F,
    grouping: Grouping,
    group_len: usize,
    pending: SmallVec<[DataPoint; 2]>,
    state: State,
}

impl<I, F> fmt::Debug for AccumulatingIterator<I, F>
where
    I: Iterator<Item = DataPoint>,
    F: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccumulatingIterator")
            .field("function", &self.function)
            .field("grouping", &self.grouping)
            .field("group_len", &self.group_len)
            .field("pending", &self.pending)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<I, F> AccumulatingIterator<I, F>
where
    I: Iterator<Item = DataPoint>,
    F: AccumulationFunction,
{
    fn new(source: I, function: F, grouping: Grouping) -> Self {
        Self {
            source: source.peekable(),
            function,
            grouping,
            group_len: 0,
            pending: SmallVec::new(),
            state: State::AwaitingFirst,
        }
    }

    fn flush_group(&mut self) {
        if self.group_len == 0 {
            return;
        }
        self.group_len = 0;
        if let Some(folded) = self.function.take_accumulated() {
            self.pending.push(folded);
        }
    }

    fn finish_if_drained(&mut self) {
        if self.source.peek().is_none() {
            self.state = State::Finished;
        }
    }
}

impl<I, F> Iterator for AccumulatingIterator<I, F>
where
    I: Iterator<Item = DataPoint>,
    F: AccumulationFunction,
{
    type Item = DataPoint;

    fn next(&mut self) -> Option<DataPoint> {
        loop {
            if !self.pending.is_empty() {
                return Some(self.pending.remove(0));
            }

            match self.state {
                State::Finished => return None,
                State::AwaitingFirst => {
                    let Some(first) = self.source.find(|point| !point.is_discontinuity()) else {
                        self.state = State::Finished;
                        return None;
                    };
                    self.state = State::Accumulating;
                    self.finish_if_drained();
                    return Some(first);
                }
                State::Accumulating => {
                    let Some(point) = self.source.next() else {
                        self.flush_group();
                        self.state = State::Finished;
                        continue;
                    };

                    if point.is_discontinuity() {
                        self.flush_group();
                        while self
                            .source
                            .next_if(|next| next.is_discontinuity())
                            .is_some()
                        {}
                        self.pending.push(point);
                        self.grouping.restart();
                        self.finish_if_drained();
                        continue;
                    }

                    if self.source.peek().is_none() {
                        self.flush_group();
                        self.pending.push(point);
                        self.state = State::Finished;
                        continue;
                    }

                    if self.grouping.opens_group(point, self.group_len) {
                        self.flush_group();
                    }
                    self.function.add_point(point);
                    self.group_len += 1;
                }
            }
        }
    }
}

impl<I, F> FusedIterator for AccumulatingIterator<I, F>
where
    I: Iterator<Item = DataPoint>,
    F: AccumulationFunction,
{
}
