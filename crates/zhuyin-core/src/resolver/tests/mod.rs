mod pairs;
mod walk;
