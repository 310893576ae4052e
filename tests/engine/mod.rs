mod tests_atomicity;
mod tests_cascade_delete;
mod tests_concurrency;
mod tests_mapping;
mod tests_pipeline;
mod tests_undo_redo;
