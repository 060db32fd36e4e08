// Domain layer: conversion models and the ports the driver depends on.

pub mod model;
pub mod ports;
