pub mod city;
pub mod distance;
