//! Render one `Group` as a Monitord record.
//!
//! Monitord ingests monitors as `application/x-www-form-urlencoded` bodies.
//! We write one body per line:
//!
//! ```text
//! run_every=300&path=<cluster>%2F<host>&monitor=<service>_PT5M_<metric>
//!   &timestamp=<secs>&output=<monitor>+%7C+<host>%3A<stat>%3D<value>%3B...
//!   &hostname=<host>&type=<type>&severity=<severity>\n
//! ```
//!
//! `path` and `hostname` name the first host of the group. Every sample of the
//! group is listed in `output`, in batch order. Hosts and statistics may not
//! contain `:`, `=` or `;`, else `output` entries could not be told apart.
//!
//! `monitor` leaves out the cluster and does not escape `_`. Groups differing
//! only by cluster share a `monitor` and are told apart by `path`. Names
//! containing `_` may collide too: service `a_PT1M_b` with metric `c` and
//! service `a` with metric `b_PT1M_c` both become `a_PT1M_b_PT1M_c`.

use sink::monitord::{Error, Group, MonitordConfig};
use url::form_urlencoded;

/// A serialized Monitord record, ready for transmission.
pub type EncodedRecord = Vec<u8>;

const OUTPUT_DELIMITERS: &'static [char] = &[':', '=', ';'];

#[inline]
fn monitor_name(service: &str, period: &str, metric: &str) -> String {
    let mut name =
        String::with_capacity(service.len() + period.len() + metric.len() + 2);
    name.push_str(service);
    name.push_str("_");
    name.push_str(period);
    name.push_str("_");
    name.push_str(metric);
    name
}

/// Encode `group`, gathered from the window starting at `timestamp`.
///
/// Fails if the group is empty, if its period spans no time or if any sample
/// carries a value that is not finite. A failure encodes nothing.
pub fn encode(
    group: &Group,
    timestamp: i64,
    config: &MonitordConfig,
) -> Result<EncodedRecord, Error> {
    let first = match group.first() {
        Some(first) => first,
        None => return Err(Error::EmptyGroup),
    };
    let period = first.period.to_string();
    let monitor = monitor_name(&first.fqdsn.service, &period, &first.fqdsn.metric);
    if first.period.is_zero() {
        return Err(Error::ZeroPeriod(monitor));
    }

    let mut output = String::with_capacity(monitor.len() + 32 * group.len());
    output.push_str(&monitor);
    output.push_str(" | ");
    for (idx, sample) in group.iter().enumerate() {
        if !sample.value.is_finite() {
            return Err(Error::NonFiniteValue {
                monitor: monitor,
                host: sample.host.clone(),
            });
        }
        for field in &[&sample.host, &sample.statistic] {
            if field.contains(OUTPUT_DELIMITERS) {
                return Err(Error::ReservedCharacter {
                    monitor: monitor,
                    field: field.to_string(),
                });
            }
        }
        if idx > 0 {
            output.push_str(";");
        }
        output.push_str(&sample.host);
        output.push_str(":");
        output.push_str(&sample.statistic);
        output.push_str("=");
        output.push_str(&sample.value.to_string());
    }

    let mut path = String::with_capacity(first.fqdsn.cluster.len() + first.host.len() + 1);
    path.push_str(&first.fqdsn.cluster);
    path.push_str("/");
    path.push_str(&first.host);

    let body = form_urlencoded::Serializer::new(String::with_capacity(512))
        .append_pair("run_every", &first.period.as_secs().to_string())
        .append_pair("path", &path)
        .append_pair("monitor", &monitor)
        .append_pair("timestamp", &timestamp.to_string())
        .append_pair("output", &output)
        .append_pair("hostname", &first.host)
        .append_pair("type", &config.monitor_type)
        .append_pair("severity", &config.severity.to_string())
        .finish();

    let mut record = body.into_bytes();
    record.push(b'\n');
    Ok(record)
}

#[cfg(test)]
mod test {
    use super::*;
    use chrono::{TimeZone, Utc};
    use metric::{AggregatedSample, Fqdsn, Period, SampleBatch};
    use sink::monitord::{group, Error, Group, MonitordConfig};
    use std::f64;
    use std::str;

    fn window() -> i64 {
        Utc.ymd(1990, 6, 12).and_hms_milli(9, 10, 11, 00).timestamp()
    }

    #[test]
    fn test_encode_single_sample() {
        let fqdsn = Fqdsn::new("service-a", "test-cluster", "metric-a");
        let batch = SampleBatch::new(window()).sample(
            AggregatedSample::new(fqdsn, Period::minutes(5), 1.5)
                .host("test-host")
                .statistic("tp99"),
        );
        let groups = group(&batch);
        let record = encode(&groups[0], batch.timestamp, &MonitordConfig::default())
            .unwrap();

        assert_eq!(
            "run_every=300&path=test-cluster%2Ftest-host\
             &monitor=service-a_PT5M_metric-a&timestamp=645181811\
             &output=service-a_PT5M_metric-a+%7C+test-host%3Atp99%3D1.5\
             &hostname=test-host&type=0&severity=3\n",
            str::from_utf8(&record).unwrap()
        );
    }

    #[test]
    fn test_encode_lists_every_host() {
        let fqdsn = Fqdsn::new("svc", "prod", "latency");
        let batch = SampleBatch::new(window())
            .sample(
                AggregatedSample::new(fqdsn.clone(), Period::minutes(1), 12.101)
                    .host("h0")
                    .statistic("max"),
            )
            .sample(
                AggregatedSample::new(fqdsn.clone(), Period::minutes(1), 3.0)
                    .host("h1")
                    .statistic("max"),
            )
            .sample(
                AggregatedSample::new(fqdsn, Period::minutes(1), -1.0)
                    .host("h0")
                    .statistic("min"),
            );
        let groups = group(&batch);
        assert_eq!(1, groups.len());

        let mut config = MonitordConfig::default();
        config.monitor_type = "7".to_string();
        config.severity = 1;
        let record = encode(&groups[0], batch.timestamp, &config).unwrap();

        assert_eq!(
            "run_every=60&path=prod%2Fh0&monitor=svc_PT1M_latency\
             &timestamp=645181811\
             &output=svc_PT1M_latency+%7C+h0%3Amax%3D12.101%3Bh1%3Amax%3D3%3Bh0%3Amin%3D-1\
             &hostname=h0&type=7&severity=1\n",
            str::from_utf8(&record).unwrap()
        );
    }

    #[test]
    fn test_encode_is_deterministic() {
        let batch = SampleBatch::new(window())
            .sample(
                AggregatedSample::new(Fqdsn::new("s", "c", "m"), Period::hours(1), 0.25)
                    .host("a"),
            )
            .sample(
                AggregatedSample::new(Fqdsn::new("s", "c", "m"), Period::hours(1), 0.5)
                    .host("b"),
            );
        let config = MonitordConfig::default();
        let groups = group(&batch);

        let first = encode(&groups[0], batch.timestamp, &config).unwrap();
        let second = encode(&groups[0], batch.timestamp, &config).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_empty_group() {
        let res = encode(&Group::default(), window(), &MonitordConfig::default());
        assert_eq!(Err(Error::EmptyGroup), res);
    }

    #[test]
    fn test_encode_non_finite() {
        for val in &[f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let batch = SampleBatch::new(window())
                .sample(
                    AggregatedSample::new(Fqdsn::new("s", "c", "m"), Period::minutes(1), 1.0)
                        .host("ok"),
                )
                .sample(
                    AggregatedSample::new(Fqdsn::new("s", "c", "m"), Period::minutes(1), *val)
                        .host("bad"),
                );
            let groups = group(&batch);
            let res = encode(&groups[0], batch.timestamp, &MonitordConfig::default());
            assert_eq!(
                Err(Error::NonFiniteValue {
                    monitor: "s_PT1M_m".to_string(),
                    host: "bad".to_string(),
                }),
                res
            );
        }
    }

    #[test]
    fn test_encode_zero_period() {
        let batch = SampleBatch::new(window()).sample(AggregatedSample::new(
            Fqdsn::new("s", "c", "m"),
            Period::seconds(0),
            1.0,
        ));
        let groups = group(&batch);
        let res = encode(&groups[0], batch.timestamp, &MonitordConfig::default());
        assert_eq!(Err(Error::ZeroPeriod("s_PT0S_m".to_string())), res);
    }

    #[test]
    fn test_encode_rejects_delimiters_in_output_entries() {
        let config = MonitordConfig::default();
        let fqdsn = Fqdsn::new("s", "c", "m");

        // Two samples whose entries would read back as one, and vice versa.
        let two = SampleBatch::new(window())
            .sample(
                AggregatedSample::new(fqdsn.clone(), Period::minutes(1), 1.0)
                    .host("h0")
                    .statistic("mean"),
            )
            .sample(
                AggregatedSample::new(fqdsn.clone(), Period::minutes(1), 2.0)
                    .host("h1")
                    .statistic("mean"),
            );
        let one = SampleBatch::new(window()).sample(
            AggregatedSample::new(fqdsn.clone(), Period::minutes(1), 2.0)
                .host("h0")
                .statistic("mean=1;h1:mean"),
        );

        let groups = group(&two);
        let record = encode(&groups[0], two.timestamp, &config).unwrap();
        assert!(str::from_utf8(&record)
            .unwrap()
            .contains("&output=s_PT1M_m+%7C+h0%3Amean%3D1%3Bh1%3Amean%3D2&"));

        let groups = group(&one);
        assert_eq!(
            Err(Error::ReservedCharacter {
                monitor: "s_PT1M_m".to_string(),
                field: "mean=1;h1:mean".to_string(),
            }),
            encode(&groups[0], one.timestamp, &config)
        );

        for host in &["a:b", "a=b", "a;b"] {
            let batch = SampleBatch::new(window()).sample(
                AggregatedSample::new(fqdsn.clone(), Period::minutes(1), 2.0)
                    .host(*host)
                    .statistic("mean"),
            );
            let groups = group(&batch);
            assert_eq!(
                Err(Error::ReservedCharacter {
                    monitor: "s_PT1M_m".to_string(),
                    field: host.to_string(),
                }),
                encode(&groups[0], batch.timestamp, &config)
            );
        }
    }

    #[test]
    fn test_encode_monitor_omits_cluster() {
        let batch = SampleBatch::new(window())
            .sample(
                AggregatedSample::new(Fqdsn::new("s", "east", "m"), Period::minutes(1), 1.0)
                    .host("h"),
            )
            .sample(
                AggregatedSample::new(Fqdsn::new("s", "west", "m"), Period::minutes(1), 1.0)
                    .host("h"),
            );
        let config = MonitordConfig::default();
        let groups = group(&batch);
        assert_eq!(2, groups.len());

        let east = encode(&groups[0], batch.timestamp, &config).unwrap();
        let west = encode(&groups[1], batch.timestamp, &config).unwrap();
        let east = str::from_utf8(&east).unwrap();
        let west = str::from_utf8(&west).unwrap();
        assert!(east.starts_with("run_every=60&path=east%2Fh&monitor=s_PT1M_m&"));
        assert!(west.starts_with("run_every=60&path=west%2Fh&monitor=s_PT1M_m&"));
    }

    #[test]
    fn test_encode_escapes_identity() {
        let batch = SampleBatch::new(window()).sample(
            AggregatedSample::new(Fqdsn::new("my svc", "c&d", "m=1"), Period::days(1), 2.0)
                .host("h"),
        );
        let groups = group(&batch);
        let record = encode(&groups[0], batch.timestamp, &MonitordConfig::default())
            .unwrap();
        let record = str::from_utf8(&record).unwrap();

        assert!(record.starts_with("run_every=86400&path=c%26d%2Fh&monitor=my+svc_P1D_m%3D1&"));
        assert_eq!(1, record.lines().count());
    }
}
