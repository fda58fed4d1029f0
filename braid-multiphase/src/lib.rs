mod multiphase;
mod observe;
mod scan;

pub use multiphase::{
    Error, Event, IgnoredFields, MultiphaseOcp, PhaseIndices, RenamedModels, Report,
};
pub use observe::Observer;
pub use scan::scan;
