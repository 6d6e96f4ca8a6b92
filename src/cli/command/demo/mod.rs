mod demo_args;

pub use demo_args::DemoArgs;
