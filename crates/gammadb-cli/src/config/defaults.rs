pub struct DefaultsConfig {
    pub structure_root: String,
    pub dataset_path: String,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            structure_root: "public".to_string(),
            dataset_path: "public/data/gamma_secretase.json".to_string(),
        }
    }
}
