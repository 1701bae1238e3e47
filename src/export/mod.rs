pub mod trajectory_file;
