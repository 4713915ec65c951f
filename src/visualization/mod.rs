pub mod morphsim_vis;
