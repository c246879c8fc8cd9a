//! Built-in example: volumes of lead, iron and aluminium in four alloy
//! samples and the measured mass of each. Fitting recovers the densities.

use crate::domain::Dataset;
use crate::error::ParseError;
use crate::io::ingest::parse_dataset;

pub const DENSITIES_CSV: &str = "V_lead,V_iron,V_aluminium,mass
0.3,0.2,0.1,5.246
0.1,0.1,0.4,3.001
0.7,0.3,0.5,11.649
0.4,0.6,0.11,9.5574";

pub fn densities() -> Result<Dataset, ParseError> {
    parse_dataset(DENSITIES_CSV)
}
