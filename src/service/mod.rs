pub mod seeder;

pub use seeder::seed_users;
