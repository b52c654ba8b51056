pub mod closed_loop;
