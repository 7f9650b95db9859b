mod approximate_decomposition;
mod exact_decomposition;
mod registry;
mod repair;
mod shapes;
mod simple_hull;
