pub mod clipboard;
pub mod error;
pub mod form;
pub mod model;
pub mod plan;
pub mod report;
pub mod slug;
pub mod verify;

pub use error::{Result, SiloError};
pub use form::{FormField, FormSnapshot, FormState};
pub use model::{LinkPlan, LinkPlanEntry, Page, PageKind, PlannedLink, Post, SiloType};
pub use plan::{generate_link_plan, working_chain};
pub use slug::url_slug;
pub use verify::{Classification, VerificationResult, audit_plan, check_validity};

pub fn print_banner() {
    let banner = r#"
   ███████╗██╗██╗      ██████╗ ██████╗ ██╗      █████╗ ███╗   ██╗
   ██╔════╝██║██║     ██╔═══██╗██╔══██╗██║     ██╔══██╗████╗  ██║
   ███████╗██║██║     ██║   ██║██████╔╝██║     ███████║██╔██╗ ██║
   ╚════██║██║██║     ██║   ██║██╔═══╝ ██║     ██╔══██║██║╚██╗██║
   ███████║██║███████╗╚██████╔╝██║     ███████╗██║  ██║██║ ╚████║
   ╚══════╝╚═╝╚══════╝ ╚═════╝ ╚═╝     ╚══════╝╚═╝  ╚═╝╚═╝  ╚═══╝
            Reverse content silo link planner
    "#;
    println!("{}", banner);
}
