use crate::classifiers::{
    GenericIntentClassifier, GovernanceClassifier, IntegrationClassifier,
    NetworkSecurityClassifier, OrchestrationClassifier,
};
use crate::core::{Analysis, Classifier, ClassifiedComponent};
use std::sync::Arc;
use tracing::warn;

/// Explicit static registry of classifier plugins.
///
/// Registration order is preserved: classifiers run in ascending
/// priority, and ties keep the order they were registered in (the sort
/// is stable), so output is deterministic without requiring unique
/// priorities.
pub struct ClassifierRegistry {
    classifiers: Vec<Arc<dyn Classifier>>,
}

impl ClassifierRegistry {
    pub fn new() -> Self {
        Self {
            classifiers: Vec::new(),
        }
    }

    /// Registry with every built-in classifier.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NetworkSecurityClassifier::new());
        registry.register(GovernanceClassifier::new());
        registry.register(OrchestrationClassifier::new());
        registry.register(IntegrationClassifier::new());
        registry.register(GenericIntentClassifier::new());
        registry
    }

    pub fn register<C: Classifier + 'static>(&mut self, classifier: C) {
        self.classifiers.push(Arc::new(classifier));
    }

    pub fn register_arc(&mut self, classifier: Arc<dyn Classifier>) {
        self.classifiers.push(classifier);
    }

    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    pub fn names(&self) -> Vec<&'static str> {
        self.ordered().iter().map(|c| c.name()).collect()
    }

    /// Classifiers in execution order.
    pub fn ordered(&self) -> Vec<Arc<dyn Classifier>> {
        let mut ordered = self.classifiers.clone();
        ordered.sort_by_key(|c| c.priority());
        ordered
    }

    /// Runs every applicable classifier and concatenates the results.
    ///
    /// An empty registry falls back to the generic classifier so the
    /// system never silently classifies nothing, and a classifier that
    /// fails is skipped with a warning rather than aborting the run.
    pub fn classify_all(&self, analysis: &Analysis) -> Vec<ClassifiedComponent> {
        let classifiers: Vec<Arc<dyn Classifier>> = if self.classifiers.is_empty() {
            vec![Arc::new(GenericIntentClassifier::new())]
        } else {
            self.ordered()
        };

        let mut components = Vec::new();
        for classifier in classifiers {
            if !classifier.can_classify(analysis) {
                continue;
            }
            match classifier.classify(analysis) {
                Ok(found) => components.extend(found),
                Err(e) => {
                    warn!(
                        classifier = classifier.name(),
                        error = %e,
                        "classifier failed, skipping"
                    );
                }
            }
        }
        components
    }
}

impl Default for ClassifierRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
