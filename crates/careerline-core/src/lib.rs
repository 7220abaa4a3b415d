// Career statistics core: season record model, career normalization, team
// logo lookup, scroll-spy navigation, and chart geometry.

pub mod chart;
pub mod layout;
pub mod navigator;
pub mod normalize;
pub mod record;
pub mod teams;
