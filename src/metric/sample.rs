use metric::Period;

/// Fully-qualified data-space name
///
/// The (service, cluster, metric) triple which names one logical metric
/// stream. Two `Fqdsn` are the same stream only if every field matches
/// exactly. No case-folding or trimming is done here; an empty field is a
/// perfectly good (if unhelpful) name.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, Default)]
pub struct Fqdsn {
    /// The service which reported the metric.
    pub service: String,
    /// The cluster the reporting service runs in.
    pub cluster: String,
    /// The name of the metric itself.
    pub metric: String,
}

impl Fqdsn {
    /// Create a new `Fqdsn`
    pub fn new<S>(service: S, cluster: S, metric: S) -> Fqdsn
    where
        S: Into<String>,
    {
        Fqdsn {
            service: service.into(),
            cluster: cluster.into(),
            metric: metric.into(),
        }
    }
}

/// A single statistic computed over one aggregation period for one host.
///
/// Samples are produced upstream and are read-only once they reach a sink.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct AggregatedSample {
    /// The metric stream this sample belongs to.
    pub fqdsn: Fqdsn,
    /// The window the statistic was computed over.
    pub period: Period,
    /// The host that reported the underlying measurements.
    #[serde(default)]
    pub host: String,
    /// The name of the statistic, `tp99` or `mean` and the like.
    #[serde(default)]
    pub statistic: String,
    /// The computed value.
    pub value: f64,
}

impl AggregatedSample {
    /// Create a new `AggregatedSample`
    ///
    /// Host and statistic start out empty. Set them with `host` and
    /// `statistic` respectively.
    pub fn new(fqdsn: Fqdsn, period: Period, value: f64) -> AggregatedSample {
        AggregatedSample {
            fqdsn: fqdsn,
            period: period,
            host: String::new(),
            statistic: String::new(),
            value: value,
        }
    }

    /// Set the reporting host of the sample.
    pub fn host<S>(mut self, host: S) -> AggregatedSample
    where
        S: Into<String>,
    {
        self.host = host.into();
        self
    }

    /// Set the statistic name of the sample.
    pub fn statistic<S>(mut self, statistic: S) -> AggregatedSample
    where
        S: Into<String>,
    {
        self.statistic = statistic.into();
        self
    }
}

/// All the samples of one aggregation window
///
/// `timestamp` is the nominal start of the window in seconds since the UNIX
/// epoch. Sample order is significant: sinks preserve it in what they emit.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct SampleBatch {
    /// Start of the window, in seconds.
    pub timestamp: i64,
    /// The samples, in the order upstream produced them.
    #[serde(default)]
    pub samples: Vec<AggregatedSample>,
}

impl SampleBatch {
    /// Create a new, empty `SampleBatch` for the window starting at
    /// `timestamp`.
    pub fn new(timestamp: i64) -> SampleBatch {
        SampleBatch {
            timestamp: timestamp,
            samples: Vec::new(),
        }
    }

    /// Append a sample to the batch.
    pub fn sample(mut self, sample: AggregatedSample) -> SampleBatch {
        self.samples.push(sample);
        self
    }

    /// Return the number of samples in the batch.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Determine if the batch holds no samples.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}
