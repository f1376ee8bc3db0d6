// Embedded confusable data compiled by build.rs from assets/data/confusables.txt.

include!(concat!(env!("OUT_DIR"), "/confusables_gen.rs"));
