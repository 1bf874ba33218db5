use crate::segments::KeepInterval;

/// Assemble the filter_complex expression that trims the input down to the
/// keep intervals and concatenates the pieces into single video and audio
/// streams labelled `[v]` and `[a]`.
///
/// Each interval contributes a `trim`/`atrim` pair reset to zero with
/// `setpts`/`asetpts`; the open-ended tail interval omits its `end=` clause
/// so it runs to the end of the input.
pub fn build_filter_complex(intervals: &[KeepInterval]) -> String {
    let mut filter = String::new();

    for (i, interval) in intervals.iter().enumerate() {
        let end = match interval.end {
            Some(end) => format!(":end={}", end),
            None => String::new(),
        };
        filter.push_str(&format!(
            "[0:v]trim=start={}{},setpts=PTS-STARTPTS[v{}];",
            interval.start, end, i
        ));
        filter.push_str(&format!(
            "[0:a]atrim=start={}{},asetpts=PTS-STARTPTS[a{}];",
            interval.start, end, i
        ));
    }

    for i in 0..intervals.len() {
        filter.push_str(&format!("[v{}][a{}]", i, i));
    }
    filter.push_str(&format!("concat=n={}:v=1:a=1[v][a]", intervals.len()));

    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_closed_and_open_intervals() {
        let intervals = vec![
            KeepInterval::closed(0.0, 4.5),
            KeepInterval::open(6.25),
        ];
        let filter = build_filter_complex(&intervals);
        assert_eq!(
            filter,
            "[0:v]trim=start=0:end=4.5,setpts=PTS-STARTPTS[v0];\
             [0:a]atrim=start=0:end=4.5,asetpts=PTS-STARTPTS[a0];\
             [0:v]trim=start=6.25,setpts=PTS-STARTPTS[v1];\
             [0:a]atrim=start=6.25,asetpts=PTS-STARTPTS[a1];\
             [v0][a0][v1][a1]concat=n=2:v=1:a=1[v][a]"
        );
    }

    #[test]
    fn test_single_interval() {
        let filter = build_filter_complex(&[KeepInterval::open(0.0)]);
        assert_eq!(
            filter,
            "[0:v]trim=start=0,setpts=PTS-STARTPTS[v0];\
             [0:a]atrim=start=0,asetpts=PTS-STARTPTS[a0];\
             [v0][a0]concat=n=1:v=1:a=1[v][a]"
        );
    }

    #[test]
    fn test_concat_arity_matches_interval_count() {
        let intervals = vec![
            KeepInterval::closed(0.0, 1.0),
            KeepInterval::closed(2.0, 3.0),
            KeepInterval::closed(4.0, 5.0),
            KeepInterval::open(6.0),
        ];
        let filter = build_filter_complex(&intervals);
        assert!(filter.ends_with("concat=n=4:v=1:a=1[v][a]"));
        assert_eq!(filter.matches("setpts=PTS-STARTPTS").count(), 4);
        assert_eq!(filter.matches("asetpts=PTS-STARTPTS").count(), 4);
    }
}
