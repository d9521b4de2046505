mod cavity_leak;
mod fatal_errors;
mod random_labels;
mod wall_hole;
