use crate::core::models::structural::Provenance;

#[derive(Debug, Clone)]
pub enum Progress {
    SubunitStart { subunit: String, comparisons: u64 },
    ComparisonFinished { species: String, provenance: Provenance },
    SubunitFinish,

    Message(String),
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn reporter_without_callback_is_silent() {
        ProgressReporter::new().report(Progress::Message("ignored".to_string()));
    }

    #[test]
    fn callback_receives_events_in_order() {
        let seen = Mutex::new(Vec::new());
        let reporter = ProgressReporter::with_callback(Box::new(|event| {
            let label = match event {
                Progress::SubunitStart { subunit, .. } => subunit,
                Progress::ComparisonFinished { species, .. } => species,
                Progress::SubunitFinish => "done".to_string(),
                Progress::Message(message) => message,
            };
            seen.lock().unwrap().push(label);
        }));

        reporter.report(Progress::SubunitStart {
            subunit: "NCT".to_string(),
            comparisons: 1,
        });
        reporter.report(Progress::ComparisonFinished {
            species: "mouse".to_string(),
            provenance: Provenance::Simulated,
        });
        reporter.report(Progress::SubunitFinish);
        drop(reporter);

        assert_eq!(seen.into_inner().unwrap(), vec!["NCT", "mouse", "done"]);
    }
}
