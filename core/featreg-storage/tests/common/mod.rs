#![allow(dead_code)]

use featreg_model::{Entity, Feature, FeatureSet, Source, ValueType};

pub fn feature_set(name: &str, project: &str, version: u32) -> FeatureSet {
    let mut fs = FeatureSet::new(name, project)
        .with_entity(Entity::new("customer_id", ValueType::Int64))
        .with_feature(Feature::new("total", ValueType::Double))
        .with_feature(Feature::new("count", ValueType::Int32));
    fs.version = version;
    fs.source = Some(Source::kafka("localhost:9092", "features"));
    fs
}

pub fn names(sets: &[FeatureSet]) -> Vec<(String, String)> {
    sets.iter()
        .map(|fs| (fs.name.clone(), fs.project.clone()))
        .collect()
}

pub fn pair(name: &str, project: &str) -> (String, String) {
    (name.to_string(), project.to_string())
}
