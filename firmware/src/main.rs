#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]

use core::future::pending;
use embassy_executor::Spawner;
use embassy_time::{Duration, Instant, Timer};
use esp_backtrace as _;
use esp_hal::clock::CpuClock;
use esp_hal::delay::Delay;
use esp_hal::i2c::master::{Config as I2cConfig, I2c};
use esp_hal::time::Rate;
use esp_hal::timer::timg::TimerGroup;
use esp_hal::Blocking;
use log::info;
use pwm_pca9685::Pca9685;
use quadruped_walker::dispatch::Dispatcher;
use quadruped_walker::gait::engine::GaitEngine;
use quadruped_walker::hal::{pca9685, Ads1115};
use quadruped_walker::robot::config::{
    ADS_ADDRESS, CALIBRATION, DISPATCH_STEPS, PCA_ADDRESS, REST_WINDOW, RUNNING_WINDOW,
};

esp_bootloader_esp_idf::esp_app_desc!();

//BUSES: [sda, scl]
//SERVOS (I2C0): [21, 22]
//SENSORS (I2C1): [25, 26]

type Bus = I2c<'static, Blocking>;

#[embassy_executor::task]
async fn dispatch_task(
    mut engine: GaitEngine<Pca9685<Bus>, Delay>,
    mut dispatcher: Dispatcher<Ads1115<Bus, Delay>>,
) {
    let running = Duration::from_secs(RUNNING_WINDOW.ticks() as u64);
    loop {
        let start = Instant::now();
        let runs = dispatcher
            .run_window(&mut engine, DISPATCH_STEPS, || start.elapsed() >= running)
            .expect("Gait run failed");
        info!("[DISPATCH] {runs} gaits run, resting");
        Timer::after_secs(REST_WINDOW.ticks() as u64).await;
    }
}

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    esp_println::logger::init_logger_from_env();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let p = esp_hal::init(config);

    let timer0 = TimerGroup::new(p.TIMG1);
    esp_hal_embassy::init(timer0.timer0);
    info!("Embassy initialized");

    let bus_config = I2cConfig::default().with_frequency(Rate::from_khz(100));
    let servo_bus = I2c::new(p.I2C0, bus_config)
        .expect("Fail creating servo i2c bus")
        .with_sda(p.GPIO21)
        .with_scl(p.GPIO22);
    let sensor_bus = I2c::new(p.I2C1, bus_config)
        .expect("Fail creating sensor i2c bus")
        .with_sda(p.GPIO25)
        .with_scl(p.GPIO26);

    let pwm = pca9685::init(servo_bus, PCA_ADDRESS).expect("Fail configurating pca driver");
    let engine = GaitEngine::new(pwm, Delay::new(), &CALIBRATION).expect("Fail homing servos");
    let dispatcher = Dispatcher::new(Ads1115::new(sensor_bus, Delay::new(), ADS_ADDRESS));

    info!("Starting quadruped...");
    spawner
        .spawn(dispatch_task(engine, dispatcher))
        .expect("Fail spawning dispatch task");

    loop {
        pending::<()>().await;
    }
}
